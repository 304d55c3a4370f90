//! Command-line dispatch
//!
//! The binary is installed once and symlinked as `check`, `in` and `out`;
//! the invoked name selects the step. Called by its own name it takes the
//! step as a subcommand instead.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(multicall = true)]
pub enum Invocation {
    #[command(flatten)]
    Applet(Step),

    #[command(name = "vault-resource", about = "Fetch Vault secrets into a flat file")]
    #[command(subcommand)]
    Resource(Step),
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Step {
    /// Emit a fresh version; no side effects
    Check,

    /// Fetch and merge secrets into the destination directory
    In {
        /// Directory that receives the secrets file
        destination: PathBuf,
    },

    /// Not supported by this resource
    Out {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Invocation {
    pub fn into_step(self) -> Step {
        match self {
            Self::Applet(step) | Self::Resource(step) => step,
        }
    }
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::In { .. } => "in",
            Self::Out { .. } => "out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Step, clap::Error> {
        Invocation::try_parse_from(args).map(Invocation::into_step)
    }

    #[test]
    fn test_symlinked_check() {
        assert_eq!(parse(&["/opt/resource/check"]).unwrap(), Step::Check);
    }

    #[test]
    fn test_symlinked_in_requires_destination() {
        assert_eq!(
            parse(&["/opt/resource/in", "/tmp/build/get"]).unwrap(),
            Step::In {
                destination: PathBuf::from("/tmp/build/get")
            }
        );
        assert!(parse(&["/opt/resource/in"]).is_err());
    }

    #[test]
    fn test_named_binary_takes_subcommand() {
        assert_eq!(parse(&["vault-resource", "check"]).unwrap(), Step::Check);
        assert_eq!(
            parse(&["/usr/local/bin/vault-resource", "in", "out-dir"]).unwrap(),
            Step::In {
                destination: PathBuf::from("out-dir")
            }
        );
    }

    #[test]
    fn test_out_accepts_any_arguments() {
        let step = parse(&["out", "/tmp/build/put"]).unwrap();
        assert_eq!(step.name(), "out");
    }

    #[test]
    fn test_unknown_applet_is_rejected() {
        assert!(parse(&["fetch"]).is_err());
    }
}
