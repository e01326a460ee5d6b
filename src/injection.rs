//! Dependency Injection: a `User` never creates its session, it is handed one.

use crate::error::{require_text, DemoError};
use crate::logger::{LogSink, SEPARATOR};

pub trait SessionStore {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str) -> Result<(), DemoError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    name: String,
}

impl Session {
    pub fn new(name: &str) -> Result<Self, DemoError> {
        require_text("session name", name)?;
        Ok(Session {
            name: name.to_string(),
        })
    }
}

impl SessionStore for Session {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) -> Result<(), DemoError> {
        require_text("session name", name)?;
        self.name = name.to_string();
        Ok(())
    }
}

pub struct User<S: SessionStore> {
    session: S,
}

impl<S: SessionStore> User<S> {
    pub fn new(session: S) -> Self {
        User { session }
    }

    pub fn name(&self) -> &str {
        self.session.name()
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), DemoError> {
        self.session.set_name(name)
    }

    pub fn into_session(self) -> S {
        self.session
    }
}

/// Wires a session into a user, renames it and appends the trace to `sink`.
pub fn run_demo<L: LogSink + ?Sized>(sink: &L) -> Result<String, DemoError> {
    let mut user = User::new(Session::new("SuperSession")?);

    let mut trace = String::new();
    trace.push_str("Dependency Injection design pattern tests\n");
    trace.push_str("This design pattern is not in GOF book\n\n");
    trace.push_str(&format!("Session's name: {}\n", user.name()));

    user.set_name("NewSuperSession")?;
    trace.push_str(&format!("New session's name: {}\n", user.name()));
    trace.push_str(SEPARATOR);
    trace.push('\n');

    sink.append(&trace);
    Ok(trace)
}
