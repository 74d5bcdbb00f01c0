use std::path::PathBuf;

use clap::{Parser, Subcommand};
use registry::Store;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the record files
    #[arg(long, env = "DATA_DIR", default_value = "atendente")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a staff account
    AddUser {
        username: String,

        password: String,

        /// admin or user
        role: String,
    },

    /// Authorize every CPF listed in a file, one per line
    Import {
        file: PathBuf,

        /// Staff name recorded on each participant
        #[arg(long, default_value = "roster")]
        by: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let store = Store::open(&args.data_dir);

    match args.command {
        Command::AddUser {
            username,
            password,
            role,
        } => {
            roster::add_user(&store, &username, &password, &role)?;
        }
        Command::Import { file, by } => {
            roster::import_file(&store, &file, &by)?;
        }
    }

    Ok(())
}
