use {
    crate::{config::Config, error::InventoryError, inventory::Inventory},
    clap::{crate_name, Parser},
    log::{debug, info},
    std::{error::Error, ffi::OsString, io::Write},
};

pub const USAGE: &str = "Usage: --list | --host <host_name>";

#[derive(Parser, Debug)]
#[command(name = crate_name!(), disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    #[arg(long, conflicts_with = "host")]
    list: bool,
    #[arg(long, value_name = "HOST_NAME", allow_hyphen_values = true)]
    host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Host(String),
}

impl Cli {
    pub fn command(self) -> Option<Command> {
        match (self.list, self.host) {
            (true, None) => Some(Command::List),
            (false, Some(host)) => Some(Command::Host(host)),
            _ => None,
        }
    }
}

/// `None` means the arguments match neither form and the caller should print
/// [`USAGE`]. Only the literal `--list` or `--host <name>` are accepted, so
/// `--host=name` is rejected and a host name may start with a hyphen.
pub fn parse_args<I, T>(args: I) -> Option<Command>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let shape_ok = match args.len() {
        2 => args[1] == "--list",
        3 => args[1] == "--host",
        _ => false,
    };
    if !shape_ok {
        return None;
    }
    match Cli::try_parse_from(args) {
        Ok(cli) => cli.command(),
        Err(_) => None,
    }
}

/// Runs one invocation end to end and returns the process exit code. The
/// usage line and JSON go to `out`, diagnostics to `err`.
pub fn execute<I, T>(
    args: I,
    load_config: impl FnOnce() -> Result<Config, InventoryError>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = match parse_args(args) {
        Some(command) => command,
        None => {
            let _ = writeln!(out, "{}", USAGE);
            return 1;
        }
    };

    let result = load_config()
        .map_err(|e| -> Box<dyn Error> { Box::new(e) })
        .and_then(|config| run(command, &config, out));
    match result {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            1
        }
    }
}

fn build(config: &Config) -> Result<Inventory, InventoryError> {
    let inventory = Inventory::load(config).map_err(|e| {
        debug!("inventory build failed with {:?}", e.kind());
        e
    })?;
    info!(
        "inventory has {} hosts in {} groups",
        inventory.host_count(),
        inventory.group_count()
    );
    Ok(inventory)
}

/// Nothing is written to `out` unless the whole inventory builds.
pub fn run(command: Command, config: &Config, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let json = match command {
        Command::List => {
            let inventory = build(config)?;
            inventory
                .to_json()
                .map_err(|e| format!("Error generating the dynamic inventory: {}", e))?
        }
        Command::Host(host) => {
            let inventory = build(config)?;
            inventory
                .host_json(&host)
                .map_err(|e| format!("Error getting variables for host '{}': {}", host, e))?
        }
    };
    writeln!(out, "{}", json)?;
    Ok(())
}
