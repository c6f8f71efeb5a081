//! `portcullis-cli` — the command surface.
//!
//! A thin dispatch layer: parse one verb, call the engine, produce one status
//! line. Verbs are case-insensitive. Wrong arity yields the verb's usage
//! error and an unknown or absent verb yields the full usage text, both via
//! clap. Classified access failures are part of the output contract
//! (`Error: <reason>`), not process failures.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use portcullis_engine::{Authorizer, EngineError, Registry};
use portcullis_store::RecordStore;

const SUCCESS: &str = "Success";

#[derive(Parser, Debug)]
#[command(name = "portcullis", version, about = "Tag-based access-control engine")]
pub struct Cli {
    /// Snapshot file backing the record store.
    #[arg(
        long,
        env = "PORTCULLIS_DB",
        default_value = "portcullis.json",
        global = true
    )]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a user with an empty domain set.
    #[command(name = "adduser")]
    AddUser { user: String, password: String },

    /// Check a stored credential.
    #[command(name = "authenticate")]
    Authenticate { user: String, password: String },

    /// Add a domain label to a user.
    #[command(name = "setdomain")]
    SetDomain { user: String, domain: String },

    /// List the users carrying a domain label.
    #[command(name = "domaininfo")]
    DomainInfo { domain: String },

    /// Add a type label to an object, creating the object on first sight.
    #[command(name = "settype")]
    SetType { object: String, r#type: String },

    /// List the objects carrying a type label.
    #[command(name = "typeinfo")]
    TypeInfo { r#type: String },

    /// Allow an operation for a (domain, type) pair.
    #[command(name = "addaccess")]
    AddAccess {
        operation: String,
        domain: String,
        r#type: String,
    },

    /// Decide whether a user may perform an operation on an object.
    #[command(name = "canaccess")]
    CanAccess {
        operation: String,
        user: String,
        object: String,
    },

    /// Clear every collection.
    #[command(name = "reset")]
    Reset,
}

/// Lowercase the verb argument so `AddUser`, `adduser`, and `ADDUSER` all
/// dispatch to the same subcommand. Flags and operand values are left
/// untouched.
pub fn normalize_verb(mut args: Vec<OsString>) -> Vec<OsString> {
    if let Some(verb) = args.get(1).and_then(|a| a.to_str()) {
        if !verb.starts_with('-') {
            let lowered = verb.to_lowercase();
            args[1] = OsString::from(lowered);
        }
    }
    args
}

/// Run one command against the engine, producing the status line.
///
/// Classified access errors become `Error: <reason>` lines; store failures
/// bubble up as hard errors for the caller to report.
pub fn execute<S>(
    command: &Command,
    registry: &Registry<S>,
    authorizer: &Authorizer<S>,
) -> Result<String, EngineError>
where
    S: RecordStore,
{
    let result = match command {
        Command::AddUser { user, password } => {
            registry.add_user(user, password).map(|()| SUCCESS.to_string())
        }
        Command::Authenticate { user, password } => registry
            .authenticate(user, password)
            .map(|()| SUCCESS.to_string()),
        Command::SetDomain { user, domain } => {
            registry.set_domain(user, domain).map(|()| SUCCESS.to_string())
        }
        Command::DomainInfo { domain } => {
            registry.domain_info(domain).map(|names| names.join("\n"))
        }
        Command::SetType { object, r#type } => {
            registry.set_type(object, r#type).map(|()| SUCCESS.to_string())
        }
        Command::TypeInfo { r#type } => {
            registry.type_info(r#type).map(|names| names.join("\n"))
        }
        Command::AddAccess {
            operation,
            domain,
            r#type,
        } => registry
            .add_grant(operation, domain, r#type)
            .map(|()| SUCCESS.to_string()),
        Command::CanAccess {
            operation,
            user,
            object,
        } => authorizer
            .can_access(operation, user, object)
            .map(|()| SUCCESS.to_string()),
        Command::Reset => registry
            .reset()
            .map(|()| "Success: cleared database".to_string()),
    };

    match result {
        Ok(line) => Ok(line),
        Err(EngineError::Access(e)) => Ok(format!("Error: {e}")),
        Err(e) => Err(e),
    }
}
