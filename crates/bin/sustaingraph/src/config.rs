use clap::{Parser, Subcommand, ValueEnum, builder::BoolishValueParser};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use sustaingraph_core::control::{HappinessIngestRequest, IndicatorIngestRequest};
use sustaingraph_core::provider::FilterParams;
use sustaingraph_core::store::neo4j::Neo4jSettings;
use sustaingraph_mcp::server::DEFAULT_MCP_HTTP_ADDR;
use sustaingraph_store::GeoCodeKind;

const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
const DEFAULT_NEO4J_USER: &str = "neo4j";
const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Parser, Debug)]
#[command(name = "sustaingraph", version, about = "SustainGraph loader and MCP server.")]
struct CliArgs {
    #[arg(long, env = "NEO4J_URI", default_value = DEFAULT_NEO4J_URI, global = true)]
    neo4j_uri: String,

    #[arg(long, env = "NEO4J_USER", default_value = DEFAULT_NEO4J_USER, global = true)]
    neo4j_user: String,

    #[arg(long, env = "NEO4J_PASSWORD", global = true, hide_env_values = true)]
    neo4j_password: Option<String>,

    #[arg(long, env = "NEO4J_DATABASE", global = true)]
    neo4j_database: Option<String>,

    #[arg(long, env = "NEO4J_MAX_CONNECTIONS", global = true)]
    neo4j_max_connections: Option<usize>,

    #[arg(
        long,
        env = "SUSTAINGRAPH_BATCH_SIZE",
        default_value_t = DEFAULT_BATCH_SIZE,
        global = true
    )]
    batch_size: usize,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Serve the query tools over MCP.
    Serve {
        #[arg(
            long = "stdio",
            env = "SUSTAINGRAPH_ENABLE_STDIO",
            default_value_t = false,
            value_parser = BoolishValueParser::new()
        )]
        enable_stdio: bool,

        #[arg(long, env = "SUSTAINGRAPH_MCP_HTTP_ADDR", default_value_t = DEFAULT_MCP_HTTP_ADDR)]
        mcp_http_addr: SocketAddr,

        #[arg(
            long,
            env = "SUSTAINGRAPH_MCP_STATEFUL",
            default_value_t = true,
            value_parser = BoolishValueParser::new()
        )]
        stateful: bool,
    },
    /// Load one Eurostat indicator dataset.
    LoadEurostat {
        /// Dataset code, e.g. `sdg_07_40`.
        code: String,

        #[arg(long, value_enum, default_value_t = SourceKind::Eurostat)]
        source: SourceKind,

        /// Directory holding `<code>.tsv` and `dic/<column>.dic` for `--source dir`.
        #[arg(long, env = "SUSTAINGRAPH_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// `column=value[,value]`, `startPeriod=YYYY` or `endPeriod=YYYY`.
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Keep only NUTS rows (area codes of 3 to 5 characters).
        #[arg(long)]
        subnational: bool,

        /// Match areas by ISO alpha-3 code instead of the Eurostat code.
        #[arg(long)]
        iso: bool,
    },
    /// Load a World Happiness Report workbook for one year.
    LoadHappiness {
        workbook: PathBuf,

        #[arg(long)]
        year: String,

        #[arg(long)]
        sheet: Option<String>,

        /// `COLUMN=SERIES_CODE`, overriding the derived series code.
        #[arg(long = "series")]
        series: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    Eurostat,
    Dir,
}

/// Where Eurostat-style tables are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EurostatSource {
    Api,
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
    pub stateful_mode: bool,
}

#[derive(Debug, Clone)]
pub enum CommandConfig {
    Serve(ServeConfig),
    LoadEurostat {
        source: EurostatSource,
        request: IndicatorIngestRequest,
    },
    LoadHappiness(HappinessIngestRequest),
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct SustainGraphConfig {
    pub neo4j: Neo4jSettings,
    pub command: CommandConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl SustainGraphConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn series_overrides(pairs: Vec<String>) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut overrides = BTreeMap::new();
    for pair in pairs {
        let parsed = pair
            .rsplit_once('=')
            .map(|(column, code)| (column.trim(), code.trim()))
            .filter(|(column, code)| !column.is_empty() && !code.is_empty());
        let Some((column, code)) = parsed else {
            return Err(ConfigError::InvalidSetting {
                name: "--series",
                value: pair,
            });
        };
        overrides.insert(column.to_string(), code.to_string());
    }
    Ok(overrides)
}

impl TryFrom<CliArgs> for SustainGraphConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.neo4j_uri.trim().is_empty() {
            return Err(ConfigError::MissingSetting("NEO4J_URI"));
        }
        if args.neo4j_user.trim().is_empty() {
            return Err(ConfigError::MissingSetting("NEO4J_USER"));
        }
        let Some(password) = non_empty(args.neo4j_password) else {
            return Err(ConfigError::MissingSetting("NEO4J_PASSWORD"));
        };

        let mut neo4j = Neo4jSettings::new(args.neo4j_uri.trim(), args.neo4j_user.trim(), password);
        if let Some(database) = non_empty(args.neo4j_database) {
            neo4j = neo4j.with_database(database.trim());
        }
        if let Some(max_connections) = args.neo4j_max_connections {
            if max_connections == 0 {
                return Err(ConfigError::InvalidSetting {
                    name: "NEO4J_MAX_CONNECTIONS",
                    value: max_connections.to_string(),
                });
            }
            neo4j = neo4j.with_max_connections(max_connections);
        }

        let loads = !matches!(args.command, CliCommand::Serve { .. });
        if loads && args.batch_size == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "SUSTAINGRAPH_BATCH_SIZE",
                value: args.batch_size.to_string(),
            });
        }

        let command = match args.command {
            CliCommand::Serve {
                enable_stdio,
                mcp_http_addr,
                stateful,
            } => CommandConfig::Serve(ServeConfig {
                enable_stdio,
                mcp_http_addr,
                stateful_mode: stateful,
            }),
            CliCommand::LoadEurostat {
                code,
                source,
                data_dir,
                filters,
                subnational,
                iso,
            } => {
                if code.trim().is_empty() {
                    return Err(ConfigError::MissingSetting("code"));
                }
                let source = match (source, data_dir) {
                    (SourceKind::Eurostat, _) => EurostatSource::Api,
                    (SourceKind::Dir, Some(dir)) => EurostatSource::Directory(dir),
                    (SourceKind::Dir, None) => {
                        return Err(ConfigError::MissingSetting("SUSTAINGRAPH_DATA_DIR"));
                    }
                };
                let filters = FilterParams::parse_pairs(&filters).map_err(|err| {
                    ConfigError::InvalidSetting {
                        name: "--filter",
                        value: err.to_string(),
                    }
                })?;
                CommandConfig::LoadEurostat {
                    source,
                    request: IndicatorIngestRequest {
                        code: code.trim().to_string(),
                        filters,
                        subnational,
                        batch_size: args.batch_size,
                        geo_kind: if iso {
                            GeoCodeKind::IsoAlpha3
                        } else {
                            GeoCodeKind::EuCode
                        },
                    },
                }
            }
            CliCommand::LoadHappiness {
                workbook,
                year,
                sheet,
                series,
            } => CommandConfig::LoadHappiness(HappinessIngestRequest {
                workbook,
                sheet: non_empty(sheet),
                year: year.trim().to_string(),
                series_codes: series_overrides(series)?,
                batch_size: args.batch_size,
            }),
        };

        Ok(Self { neo4j, command })
    }
}
