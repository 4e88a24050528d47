//! CLI structure and command definitions.
//!
//! One subcommand per GeoNode resource type, each with the
//! `list | describe | patch | delete | create | upload | metadata` verbs
//! that apply to it. Connection settings come from the environment
//! (`GEONODE_API_URL`, `GEONODE_API_BASIC_AUTH`), not from flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line client for the GeoNode v2 REST API
#[derive(Parser, Debug)]
#[command(name = "geonodectl")]
#[command(version, about = "Command-line client for the GeoNode v2 REST API")]
#[command(long_about = "
Command-line client for the GeoNode v2 REST API

Set the following environment variables before starting:

    GEONODE_API_URL         https://geonode.example.com/api/v2/
                            full path to the v2 endpoint of the target instance
    GEONODE_API_BASIC_AUTH  pre-encoded Basic auth token, generated like:
                            echo -n user:password | base64

EXAMPLES:
    geonodectl dataset list --filter is_published=true
    geonodectl dataset upload -f roads.shp --charset UTF-8
    geonodectl maps create --title 'My map' --maplayers 5 8
    geonodectl resources delete 5-10
    geonodectl users describe 3 --groups --raw
")]
pub struct Cli {
    /// Allow requests against endpoints with self-signed TLS certificates
    #[arg(long = "not-verify-ssl", global = true)]
    pub not_verify_ssl: bool,

    /// Print the raw response JSON as it comes from the REST API
    #[arg(long = "raw", alias = "json", global = true)]
    pub raw: bool,

    /// Number of results to return per page
    #[arg(long, global = true, default_value_t = 80)]
    pub page_size: u32,

    /// Page number within the paginated result set
    #[arg(long, global = true, default_value_t = 1)]
    pub page: u32,

    /// Read connection settings from a KEY=VALUE file instead of the environment
    #[arg(long, global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands, one per resource type.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generic resource commands across all resource types
    #[command(alias = "resource")]
    Resources {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Dataset commands
    #[command(alias = "ds")]
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },
    /// Document commands
    #[command(aliases = ["doc", "document"])]
    Documents {
        #[command(subcommand)]
        command: DocumentCommands,
    },
    /// Map commands
    Maps {
        #[command(subcommand)]
        command: MapCommands,
    },
    /// User commands
    #[command(alias = "user")]
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// GeoApp commands
    #[command(alias = "apps")]
    Geoapps {
        #[command(subcommand)]
        command: GeoappCommands,
    },
    /// Upload session commands
    Uploads {
        #[command(subcommand)]
        command: UploadCommands,
    },
    /// Execution request commands
    #[command(alias = "execrequest")]
    Executionrequest {
        #[command(subcommand)]
        command: ExecutionRequestCommands,
    },
    /// (Hierarchical) keyword commands
    Keywords {
        #[command(subcommand)]
        command: KeywordCommands,
    },
    /// Thesauri keyword commands
    #[command(alias = "thesaurikeywords")]
    Tkeywords {
        #[command(subcommand)]
        command: KeywordCommands,
    },
    /// Thesauri keyword label commands
    #[command(alias = "thesaurikeywordlabels")]
    Tkeywordlabels {
        #[command(subcommand)]
        command: KeywordCommands,
    },
    /// Linked-resource relations of a resource
    Linkedresources {
        #[command(subcommand)]
        command: LinkedResourceCommands,
    },
    /// Dataset attribute-set commands
    Attributes {
        #[command(subcommand)]
        command: AttributeCommands,
    },
}

/// Parses a `FIELD=VALUE` pair, splitting on the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .ok_or_else(|| format!("could not parse '{s}' as FIELD=VALUE"))
}

/// List filtering shared by every `list` verb.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by FIELD=VALUE pairs; dotted fields reach into nested
    /// objects, e.g. --filter is_published=true owner.username=admin
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_key_value, num_args = 1..)]
    pub filter: Vec<(String, String)>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Field to order the results by
    #[arg(long)]
    pub ordering: Option<String>,
}

/// Free-form JSON payload, as a literal or a file. Mutually exclusive.
#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// Fields as a JSON string, e.g. '{"category": {"identifier": "farming"}}'
    #[arg(long = "set", value_name = "JSON", conflicts_with = "json_path")]
    pub fields: Option<String>,

    /// Path to a JSON file with the fields
    #[arg(long = "json-path", value_name = "FILE")]
    pub json_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List resources
    List(FilterArgs),
    /// Get resource details
    Describe { pk: u64 },
    /// Delete resources by pk, comma list or range (e.g. 5-10)
    Delete { pk: String },
    /// Download the metadata document of a resource
    Metadata {
        pk: u64,
        /// Metadata format to download
        #[arg(long = "metadata-type", default_value = "ISO",
              value_parser = clap::builder::PossibleValuesParser::new(
                  geonode_client::resources::SUPPORTED_METADATA_TYPES.iter().copied()))]
        metadata_type: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DatasetCommands {
    /// List datasets
    List(FilterArgs),
    /// Upload a new dataset
    Upload(DatasetUploadArgs),
    /// Patch dataset metadata
    Patch {
        pk: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Get dataset details
    Describe { pk: u64 },
    /// Delete datasets by pk, comma list or range
    Delete { pk: String },
}

#[derive(Args, Debug, Clone)]
pub struct DatasetUploadArgs {
    /// File to upload; for shapefiles point at the .shp and keep the
    /// .dbf/.shx/.prj next to it
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file_path: PathBuf,

    /// Upload the dataset as a timeseries
    #[arg(long)]
    pub time: bool,

    /// File encoding of the data
    #[arg(long, default_value = "UTF-8")]
    pub charset: String,

    /// Declare the dataset upload a mosaic
    #[arg(long)]
    pub mosaic: bool,

    /// Overwrite a layer with the same name if it exists
    #[arg(long)]
    pub overwrite_existing_layer: bool,

    /// Skip layers that already exist
    #[arg(long)]
    pub skip_existing_layers: bool,
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// List documents
    List(FilterArgs),
    /// Upload a new document
    Upload {
        /// File to upload
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file_path: PathBuf,
        /// Register without a landing page; the file stays downloadable
        /// through its link
        #[arg(long)]
        metadata_only: bool,
        /// File encoding of the document
        #[arg(long, default_value = "UTF-8")]
        charset: String,
    },
    /// Patch document metadata
    Patch {
        pk: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Get document details
    Describe { pk: u64 },
    /// Delete documents by pk, comma list or range
    Delete { pk: String },
}

#[derive(Subcommand, Debug)]
pub enum MapCommands {
    /// List maps
    List(FilterArgs),
    /// Patch map metadata
    Patch {
        pk: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Get map details
    Describe { pk: u64 },
    /// Delete maps by pk, comma list or range
    Delete { pk: String },
    /// Create an (empty) map
    Create {
        /// Title of the new map
        #[arg(long, conflicts_with_all = ["fields", "json_path"])]
        title: Option<String>,
        #[command(flatten)]
        payload: PayloadArgs,
        /// Dataset pks to add as map layers
        #[arg(long, value_name = "PK", num_args = 1..)]
        maplayers: Vec<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List(FilterArgs),
    /// Get user details, or the user's groups or visible resources
    Describe {
        pk: u64,
        /// Show the groups of the user
        #[arg(long = "groups", conflicts_with = "user_resources")]
        user_groups: bool,
        /// Show the resources visible to the user
        #[arg(long = "resources")]
        user_resources: bool,
    },
    /// Patch user metadata
    Patch {
        pk: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete users by pk, comma list or range
    Delete { pk: String },
    /// Create a new user
    Create {
        /// Username of the new user
        #[arg(long, conflicts_with_all = ["fields", "json_path"])]
        username: Option<String>,
        /// Email of the new user
        #[arg(long, default_value = "")]
        email: String,
        /// First name of the new user
        #[arg(long, default_value = "")]
        first_name: String,
        /// Last name of the new user
        #[arg(long, default_value = "")]
        last_name: String,
        /// Make the new user a superuser
        #[arg(long)]
        is_superuser: bool,
        /// Make the new user a staff user
        #[arg(long)]
        is_staff: bool,
        #[command(flatten)]
        payload: PayloadArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum GeoappCommands {
    /// List geoapps
    List(FilterArgs),
    /// Patch geoapp metadata
    Patch {
        pk: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Get geoapp details
    Describe { pk: u64 },
    /// Delete geoapps by pk, comma list or range
    Delete { pk: String },
}

#[derive(Subcommand, Debug)]
pub enum UploadCommands {
    /// List upload sessions
    List(FilterArgs),
}

#[derive(Subcommand, Debug)]
pub enum ExecutionRequestCommands {
    /// List execution requests
    List(FilterArgs),
    /// Get execution request details
    Describe { exec_id: String },
}

#[derive(Subcommand, Debug)]
pub enum KeywordCommands {
    /// List keywords
    List(FilterArgs),
    /// Get keyword details
    Describe { pk: u64 },
}

#[derive(Subcommand, Debug)]
pub enum LinkedResourceCommands {
    /// List the linked_to/linked_by relations of a resource
    List { pk: u64 },
    /// Link target resources to a resource
    Add {
        pk: u64,
        /// Target resource pks to link
        #[arg(long = "to", value_name = "PK", num_args = 1.., required = true)]
        targets: Vec<u64>,
    },
    /// Remove the link between a resource and targets
    Delete {
        pk: u64,
        /// Target resource pks to unlink
        #[arg(long = "to", value_name = "PK", num_args = 1.., required = true)]
        targets: Vec<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttributeCommands {
    /// Show the attribute set of a dataset
    Describe { pk: u64 },
    /// Patch dataset attributes
    Patch {
        pk: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
}
