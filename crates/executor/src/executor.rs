//! The Executor - single entry point to the document store.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate handler and converts results to outputs.

use std::sync::Arc;

use sitedata_engine::Database;
use tracing::debug;

use crate::handlers::{application, collection, singleton};
use crate::route::{route, Request};
use crate::{Command, Output, Result};

/// The command executor - single entry point to the document store.
///
/// The Executor is **stateless**: it holds a reference to the database but
/// maintains no state of its own. All state lives in the document.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads; concurrent
/// writes are serialized by the database.
///
/// # Example
///
/// ```ignore
/// use sitedata_executor::{Command, Executor, Method, Request};
/// use sitedata_engine::Database;
///
/// let executor = Executor::new(Database::ephemeral());
///
/// // Single command execution
/// let output = executor.execute(Command::List { collection: "clients".into() })?;
///
/// // Straight from a request
/// let output = executor.handle(Request::new(Method::Get).resource("websiteStats"))?;
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    db: Arc<Database>,
}

impl Executor {
    /// Create a new executor wrapping a database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        debug!(target: "sitedata::executor", command = cmd.name(), "Executing command");
        let db = self.db.as_ref();
        match cmd {
            Command::Dump => collection::dump(db),

            // Collection commands
            Command::List { collection } => collection::list(db, collection),
            Command::Get { collection, id } => collection::get(db, collection, id),
            Command::Append { collection, record } => collection::append(db, collection, record),
            Command::Update {
                collection,
                id,
                partial,
            } => collection::update(db, collection, id, partial),
            Command::Remove { collection, id } => collection::remove(db, collection, id),

            // Singleton commands
            Command::SingletonGet { name } => singleton::get(db, name),
            Command::SingletonMerge { name, partial } => singleton::merge(db, name, partial),

            // Forms
            Command::SubmitApplication { fields } => application::submit(db, fields),
        }
    }

    /// Route a request against the database schema, then execute it.
    pub fn handle(&self, request: Request) -> Result<Output> {
        let cmd = route(self.db.schema(), request)?;
        self.execute(cmd)
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let results = executor.execute_many(vec![cmd1, cmd2, cmd3]);
    /// // results[0] corresponds to cmd1, etc.
    /// ```
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }
}
