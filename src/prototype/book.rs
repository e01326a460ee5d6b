use std::ptr;

#[cfg(test)]
use std::cell::Cell;

use crate::error::{require_text, DemoError};
use crate::prototype::Prototype;

/// The duplicable entity.
///
/// `Clone` is not derived on purpose: the only ways to duplicate a book are
/// the two strategies of [`Prototype`].
#[derive(Debug, PartialEq, Eq)]
pub struct Book {
    title: String,
    topic: String,
    tags: Vec<String>,
}

impl Book {
    /// Builds a book and derives its tags from the words of title and topic.
    pub fn new(title: &str, topic: &str) -> Result<Self, DemoError> {
        require_text("title", title)?;
        require_text("topic", topic)?;

        let tags = derive_tags(title, topic);
        Ok(Book {
            title: title.to_string(),
            topic: topic.to_string(),
            tags,
        })
    }

    /// Runs the full constructor, then swaps the derived tags for `tags`.
    pub fn with_tags<I, S>(title: &str, topic: &str, tags: I) -> Result<Self, DemoError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut book = Book::new(title, topic)?;
        book.tags = tags.into_iter().map(Into::into).collect();
        Ok(book)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DemoError> {
        require_text("title", title)?;
        self.title = title.to_string();
        Ok(())
    }

    pub fn set_topic(&mut self, topic: &str) -> Result<(), DemoError> {
        require_text("topic", topic)?;
        self.topic = topic.to_string();
        Ok(())
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    /// True when any heap buffer of `self` is also a buffer of `other`.
    pub fn shares_storage_with(&self, other: &Book) -> bool {
        if same_buffer(&self.title, &other.title) || same_buffer(&self.topic, &other.topic) {
            return true;
        }
        if !self.tags.is_empty() && ptr::eq(self.tags.as_ptr(), other.tags.as_ptr()) {
            return true;
        }
        self.tags
            .iter()
            .any(|mine| other.tags.iter().any(|theirs| same_buffer(mine, theirs)))
    }
}

impl Prototype for Book {
    // title, topic: fresh String each, contents copied
    // tags: fresh Vec, every element copied into a fresh String
    // nothing is shared with `self`, nothing is re-derived
    fn duplicate_via_clone(&self) -> Self {
        let mut tags = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            tags.push(String::from(tag.as_str()));
        }

        Book {
            title: String::from(self.title.as_str()),
            topic: String::from(self.topic.as_str()),
            tags,
        }
    }

    fn duplicate_via_copy(&self) -> Result<Self, DemoError> {
        let title = self.title();
        let topic = self.topic();
        let tags = self.tags().iter().map(String::as_str);
        Book::with_tags(title, topic, tags)
    }
}

fn same_buffer(a: &str, b: &str) -> bool {
    !a.is_empty() && ptr::eq(a.as_ptr(), b.as_ptr())
}

#[cfg(test)]
thread_local! {
    static DERIVATIONS: Cell<usize> = Cell::new(0);
}

fn derive_tags(title: &str, topic: &str) -> Vec<String> {
    #[cfg(test)]
    DERIVATIONS.with(|count| count.set(count.get() + 1));

    let mut tags: Vec<String> = Vec::new();
    for word in title.split_whitespace().chain(topic.split_whitespace()) {
        let tag = word.to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
