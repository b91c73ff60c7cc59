use crate::cli::{Commands, ConfigCommand, ExportCommand, NarrateCommand, ScanCommand, TxCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Config { command } => match command {
            ConfigCommand::Show { json } | ConfigCommand::Set { json, .. } => *json,
        },
        Commands::Tx { command } => match command {
            TxCommand::Add { json, .. }
            | TxCommand::List { json }
            | TxCommand::Remove { json, .. } => *json,
        },
        Commands::Narrate { command } => match command {
            NarrateCommand::Request { json, .. } | NarrateCommand::Apply { json, .. } => *json,
        },
        Commands::Scan { command } => match command {
            ScanCommand::Request { json, .. } | ScanCommand::Apply { json, .. } => *json,
        },
        Commands::Export { command } => match command {
            ExportCommand::Word { json, .. }
            | ExportCommand::Gdoc { json, .. }
            | ExportCommand::Pdf { json, .. } => *json,
        },
        Commands::Report { json } | Commands::Reset { json, .. } => *json,
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}
