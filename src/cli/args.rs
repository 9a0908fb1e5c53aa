//! CLI argument parsing.
//!
//! Hand-rolled parser for the algoviz CLI. Accepts any iterator of strings
//! so parsing is testable without touching the process environment.

use std::path::PathBuf;

use crate::engine::generator::ParamArgs;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
    /// Optional YAML configuration file (`--config`).
    pub config_path: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the algorithm catalogue
    List,
    /// Print every step of one trace
    Show {
        /// Catalogue id.
        algorithm: String,
        /// `--set key=value` bindings.
        bindings: ParamArgs,
        /// Emit the trace as JSON instead of text.
        json: bool,
    },
    /// Play one trace in real time
    Play {
        /// Catalogue id.
        algorithm: String,
        /// `--set key=value` bindings.
        bindings: ParamArgs,
        /// Optional speed override.
        speed: Option<u32>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        let (config_path, args) = Self::extract_config(args);

        if args.len() < 2 {
            return Self {
                command: Command::Help,
                config_path,
            };
        }

        let command = match args[1].as_str() {
            "list" => Command::List,
            "show" => Self::parse_show_command(&args),
            "play" => Self::parse_play_command(&args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self {
            command,
            config_path,
        }
    }

    /// Pull `--config <path>` out from anywhere on the line.
    fn extract_config(args: &[String]) -> (Option<PathBuf>, Vec<String>) {
        let mut config_path = None;
        let mut rest = Vec::with_capacity(args.len());
        let mut i = 0;
        while i < args.len() {
            if args[i] == "--config" {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: '--config' requires a file path");
                    i += 1;
                }
            } else {
                rest.push(args[i].clone());
                i += 1;
            }
        }
        (config_path, rest)
    }

    /// Parse one `key=value` binding.
    fn parse_binding(raw: &str) -> Option<(String, String)> {
        let (key, value) = raw.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    }

    /// Parse the 'show' command arguments.
    fn parse_show_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'show' command requires an algorithm id");
            return Command::Help;
        }

        let mut bindings = ParamArgs::new();
        let mut json = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--set" => {
                    if i + 1 < args.len() {
                        match Self::parse_binding(&args[i + 1]) {
                            Some((key, value)) => {
                                bindings.insert(key, value);
                            }
                            None => {
                                eprintln!("Error: expected key=value after --set, got '{}'", args[i + 1]);
                                return Command::Help;
                            }
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--json" => {
                    json = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Show {
            algorithm: args[2].clone(),
            bindings,
            json,
        }
    }

    /// Parse the 'play' command arguments.
    fn parse_play_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'play' command requires an algorithm id");
            return Command::Help;
        }

        let mut bindings = ParamArgs::new();
        let mut speed = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--set" => {
                    if i + 1 < args.len() {
                        match Self::parse_binding(&args[i + 1]) {
                            Some((key, value)) => {
                                bindings.insert(key, value);
                            }
                            None => {
                                eprintln!("Error: expected key=value after --set, got '{}'", args[i + 1]);
                                return Command::Help;
                            }
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--speed" => {
                    if i + 1 < args.len() {
                        if let Ok(s) = args[i + 1].parse() {
                            speed = Some(s);
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }

        Command::Play {
            algorithm: args[2].clone(),
            bindings,
            speed,
        }
    }
}
