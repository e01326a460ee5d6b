//! Visitor: pricing and labelling a basket of fruit through double dispatch.

use rand::Rng;

use crate::error::DemoError;
use crate::logger::{LogSink, SEPARATOR};
use crate::settings::VisitorSettings;

pub const MAX_WEIGHT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Produce {
    pub weight: f64,
    pub price: f64,
}

impl Produce {
    fn with_weight(weight: f64) -> Self {
        Produce { weight, price: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fruit {
    Apple(Produce),
    Banana(Produce),
    Orange(Produce),
}

impl Fruit {
    pub fn apple<R: Rng>(rng: &mut R) -> Self {
        Fruit::Apple(Produce::with_weight(random_weight(rng)))
    }

    pub fn banana<R: Rng>(rng: &mut R) -> Self {
        Fruit::Banana(Produce::with_weight(random_weight(rng)))
    }

    pub fn orange<R: Rng>(rng: &mut R) -> Self {
        Fruit::Orange(Produce::with_weight(random_weight(rng)))
    }

    pub fn produce(&self) -> &Produce {
        match self {
            Fruit::Apple(p) | Fruit::Banana(p) | Fruit::Orange(p) => p,
        }
    }

    pub fn accept<V: FruitVisitor + ?Sized>(&mut self, visitor: &mut V) {
        match self {
            Fruit::Apple(p) => visitor.visit_apple(p),
            Fruit::Banana(p) => visitor.visit_banana(p),
            Fruit::Orange(p) => visitor.visit_orange(p),
        }
    }
}

fn random_weight<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..MAX_WEIGHT)
}

pub trait FruitVisitor {
    fn visit_apple(&mut self, produce: &mut Produce);
    fn visit_banana(&mut self, produce: &mut Produce);
    fn visit_orange(&mut self, produce: &mut Produce);
}

// =============================================================================
// Visitors
// =============================================================================

/// Sets each fruit's price from its weight and keeps the running total.
#[derive(Debug, Default)]
pub struct PricingVisitor {
    total: f64,
}

impl PricingVisitor {
    pub const APPLE_UNIT_PRICE: f64 = 0.5;
    pub const BANANA_UNIT_PRICE: f64 = 0.3;
    pub const ORANGE_UNIT_PRICE: f64 = 0.8;

    pub fn total(&self) -> f64 {
        self.total
    }

    fn price(&mut self, produce: &mut Produce, unit_price: f64) {
        produce.price = produce.weight * unit_price;
        self.total += produce.price;
    }
}

impl FruitVisitor for PricingVisitor {
    fn visit_apple(&mut self, produce: &mut Produce) {
        self.price(produce, Self::APPLE_UNIT_PRICE);
    }

    fn visit_banana(&mut self, produce: &mut Produce) {
        self.price(produce, Self::BANANA_UNIT_PRICE);
    }

    fn visit_orange(&mut self, produce: &mut Produce) {
        self.price(produce, Self::ORANGE_UNIT_PRICE);
    }
}

#[derive(Debug, Default)]
pub struct LabelVisitor {
    labels: Vec<String>,
}

impl LabelVisitor {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn label(&mut self, name: &str, produce: &Produce) {
        self.labels.push(format!(
            "{}: weight {:.2}, price {:.2}",
            name, produce.weight, produce.price
        ));
    }
}

impl FruitVisitor for LabelVisitor {
    fn visit_apple(&mut self, produce: &mut Produce) {
        self.label("Apple", produce);
    }

    fn visit_banana(&mut self, produce: &mut Produce) {
        self.label("Banana", produce);
    }

    fn visit_orange(&mut self, produce: &mut Produce) {
        self.label("Orange", produce);
    }
}

// =============================================================================
// Demo
// =============================================================================

pub fn build_basket<R: Rng>(settings: &VisitorSettings, rng: &mut R) -> Vec<Fruit> {
    let mut basket = Vec::with_capacity(settings.apples + settings.bananas + settings.oranges);
    basket.extend((0..settings.apples).map(|_| Fruit::apple(rng)));
    basket.extend((0..settings.bananas).map(|_| Fruit::banana(rng)));
    basket.extend((0..settings.oranges).map(|_| Fruit::orange(rng)));
    basket
}

/// Prices a basket, labels it and appends the trace to `sink`.
pub fn run_demo<L, R>(
    sink: &L,
    settings: &VisitorSettings,
    rng: &mut R,
) -> Result<String, DemoError>
where
    L: LogSink + ?Sized,
    R: Rng,
{
    let mut basket = build_basket(settings, rng);
    if basket.is_empty() {
        return Err(DemoError::invalid_argument("basket"));
    }

    let mut pricing = PricingVisitor::default();
    let mut labels = LabelVisitor::default();
    for fruit in &mut basket {
        fruit.accept(&mut pricing);
        fruit.accept(&mut labels);
    }

    let mut trace = String::from("VISITOR\n\n");
    for label in labels.labels() {
        trace.push_str(label);
        trace.push('\n');
    }
    trace.push_str(&format!("Total price: {:.2}\n", pricing.total()));
    trace.push_str(SEPARATOR);
    trace.push('\n');

    sink.append(&trace);
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_weight_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let fruit = Fruit::banana(&mut rng);
            let weight = fruit.produce().weight;
            assert!((0.0..MAX_WEIGHT).contains(&weight));
            assert_eq!(fruit.produce().price, 0.0);
        }
    }

    #[test]
    fn test_pricing_dispatches_per_variant() {
        let mut apple = Fruit::Apple(Produce::with_weight(10.0));
        let mut orange = Fruit::Orange(Produce::with_weight(10.0));
        let mut pricing = PricingVisitor::default();

        apple.accept(&mut pricing);
        orange.accept(&mut pricing);

        assert!((apple.produce().price - 5.0).abs() < 1e-9);
        assert!((orange.produce().price - 8.0).abs() < 1e-9);
        assert!((pricing.total() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_labels_follow_basket_order() {
        let mut basket = vec![
            Fruit::Banana(Produce::with_weight(2.0)),
            Fruit::Apple(Produce::with_weight(4.0)),
        ];
        let mut labels = LabelVisitor::default();
        for fruit in &mut basket {
            fruit.accept(&mut labels);
        }

        assert_eq!(
            labels.labels(),
            &["Banana: weight 2.00, price 0.00", "Apple: weight 4.00, price 0.00"]
        );
    }

    #[test]
    fn test_visitor_as_trait_object() {
        let mut fruit = Fruit::Orange(Produce::with_weight(1.0));
        let visitor: &mut dyn FruitVisitor = &mut PricingVisitor::default();
        fruit.accept(visitor);
        assert!(fruit.produce().price > 0.0);
    }

    #[test]
    fn test_build_basket_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let basket = build_basket(&VisitorSettings::default(), &mut rng);

        assert_eq!(basket.len(), 4);
        assert_eq!(basket.iter().filter(|f| matches!(f, Fruit::Apple(_))).count(), 2);
    }

    #[test]
    fn test_run_demo_is_deterministic_for_seed() {
        let first_log = MemoryLog::new();
        let second_log = MemoryLog::new();
        let settings = VisitorSettings::default();

        let first = run_demo(&first_log, &settings, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = run_demo(&second_log, &settings, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("VISITOR\n"));
        assert!(first.contains("Total price: "));
        assert_eq!(first_log.entries(), vec![first]);
    }

    #[test]
    fn test_empty_basket_rejected() {
        let log = MemoryLog::new();
        let settings = VisitorSettings {
            apples: 0,
            bananas: 0,
            oranges: 0,
        };
        let result = run_demo(&log, &settings, &mut StdRng::seed_from_u64(0));

        assert!(matches!(result, Err(DemoError::InvalidArgument { field: "basket" })));
        assert!(log.entries().is_empty());
    }
}
