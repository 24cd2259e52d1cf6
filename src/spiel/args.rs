use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spiel")]
#[command(about = "Command-line catalogue for reusable scripts and talk tracks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalogue directory (defaults to $SPIEL_CATALOG, then the platform
    /// data dir)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new script
    #[command(alias = "n")]
    Create {
        /// Title (optional, opens the editor if not provided)
        #[arg(required = false)]
        title: Option<String>,

        /// Content
        #[arg(required = false)]
        content: Option<String>,

        /// File the script under a category (name or id)
        #[arg(short, long)]
        category: Option<String>,

        /// Tag the script (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// List scripts
    #[command(alias = "ls")]
    List {
        /// Free-text search over title and content
        #[arg(short, long)]
        search: Option<String>,

        /// Only scripts carrying this tag (repeatable; all must match by
        /// default)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Match any of the selected tags instead of all of them
        #[arg(long)]
        any_tag: bool,

        /// Only scripts in this category (name or id)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// View one or more scripts in full
    #[command(alias = "v")]
    View {
        /// Ordinals, ranges, or a title term (e.g. 1 3-5, or "warm intro")
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Copy a script's content to the clipboard
    #[command(alias = "c")]
    Copy {
        /// Ordinal, range, or a title term
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Edit a script in the editor, or reclassify it with flags
    #[command(alias = "e")]
    Edit {
        /// Ordinals, ranges, or a title term
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Move the script to this category (name or id)
        #[arg(short, long, conflicts_with = "root")]
        category: Option<String>,

        /// Move the script out of any category
        #[arg(long)]
        root: bool,

        /// Replace the script's tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Delete one or more scripts permanently
    #[command(alias = "rm")]
    Delete {
        /// Ordinals, ranges, or a title term
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Ranked search over titles and content
    Search { term: String },

    /// Manage categories
    #[command(alias = "cat")]
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// List tags in use with counts
    Tags,

    /// Import scripts from text files or directories
    Import {
        /// Files or directories to import
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        /// File imported scripts under a category (name or id)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Export scripts to a .tar.gz archive
    Export {
        /// Ordinals, ranges, or a title term (exports everything when
        /// omitted)
        #[arg(num_args = 0..)]
        selectors: Vec<String>,
    },

    /// Print the content file path of one or more scripts
    Path {
        /// Ordinals, ranges, or a title term
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Audit the catalogue for inconsistencies
    Doctor {
        /// Also repair store-level issues (missing/orphaned content files)
        #[arg(long)]
        fix: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (file-ext, tag-match)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },

    /// Initialize the catalogue directory
    Init,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Show the category tree with script counts
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        name: String,

        /// Parent category (name or id)
        #[arg(short, long)]
        parent: Option<String>,

        /// Position among siblings
        #[arg(short, long, default_value_t = 0)]
        sort: i64,
    },

    /// Rename a category
    Rename {
        /// Category to rename (name or id)
        reference: String,
        name: String,
    },

    /// Move a category under another parent, or to the top level
    Move {
        /// Category to move (name or id)
        reference: String,

        /// New parent (name or id)
        #[arg(short, long, conflicts_with = "root")]
        parent: Option<String>,

        /// Move to the top level
        #[arg(long)]
        root: bool,
    },

    /// Delete a category (children and scripts are kept, not cascaded)
    #[command(alias = "rm")]
    Delete {
        /// Category to delete (name or id)
        reference: String,
    },
}
