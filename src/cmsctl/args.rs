use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cmsctl")]
#[command(about = "Edit remote CMS resources from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to a CMS instance
    Login {
        host: String,
        username: String,
        password: String,
    },

    /// Switch between projects and environments
    Use {
        project: String,
        environment: String,
    },

    /// Set a settings value, such as "editor"
    Set { name: String, value: String },

    /// Get a settings value, such as "editor"
    Get { name: String },

    /// Work with projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Work with content nodes
    Content {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Work with schemas
    Schema {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Work with forms
    Form {
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Work with connections
    Connection {
        #[command(subcommand)]
        command: ResourceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List all projects
    Ls,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List all resources in this category
    Ls,

    /// Create a new resource and open it in the editor
    New {
        /// Schema id (required for content)
        schema: Option<String>,
    },

    /// Remove a resource
    Rm { id: String },

    /// Edit a resource in your editor
    Edit { id: String },
}
