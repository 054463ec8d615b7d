//! Explicit confirmation of destructive [`Command`]s.
//!
//! A destructive [`Command`] is only executable as [`Confirmed`], and the
//! only way to obtain a [`Confirmed`] one is to [`Unconfirmed::confirm()`]
//! it after showing its [`Unconfirmed::prompt()`] to the user.
//!
//! [`Command`]: super::Command

/// [`Command`] requiring an explicit confirmation before being executed.
///
/// [`Command`]: super::Command
pub trait Confirmable {
    /// Returns the question the user should confirm.
    fn prompt(&self) -> String;
}

/// [`Confirmable`] command awaiting a confirmation.
#[derive(Clone, Debug)]
pub struct Unconfirmed<C>(C);

impl<C: Confirmable> Unconfirmed<C> {
    /// Wraps the provided `cmd` to await a confirmation.
    #[must_use]
    pub const fn new(cmd: C) -> Self {
        Self(cmd)
    }

    /// Returns the question the user should confirm.
    #[must_use]
    pub fn prompt(&self) -> String {
        self.0.prompt()
    }

    /// Confirms the command, making it executable.
    #[must_use]
    pub fn confirm(self) -> Confirmed<C> {
        Confirmed(self.0)
    }

    /// Cancels the command, giving it back.
    #[must_use]
    pub fn cancel(self) -> C {
        self.0
    }
}

/// [`Confirmable`] command confirmed by the user.
#[derive(Clone, Debug)]
pub struct Confirmed<C>(C);

impl<C> Confirmed<C> {
    /// Returns the confirmed command.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.0
    }
}

#[cfg(test)]
mod spec {
    use super::{Confirmable, Unconfirmed};

    #[derive(Debug, PartialEq)]
    struct Wipe(&'static str);

    impl Confirmable for Wipe {
        fn prompt(&self) -> String {
            format!("Wipe `{}`?", self.0)
        }
    }

    #[test]
    fn confirms_explicitly() {
        let cmd = Unconfirmed::new(Wipe("menu"));

        assert_eq!(cmd.prompt(), "Wipe `menu`?");
        assert_eq!(cmd.confirm().into_inner(), Wipe("menu"));
    }

    #[test]
    fn cancel_gives_command_back() {
        let cmd = Unconfirmed::new(Wipe("orders"));

        assert_eq!(cmd.cancel(), Wipe("orders"));
    }
}
