use chatty_sessions::cli::Command;
use chatty_sessions::config::{Configuration, init_logger, verbose};
use chatty_sessions::session::{LocalTranscript, Session};
use chatty_sessions::storage::new_storage;
use eyre::{Context, Result};

fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    Configuration::init(config.clone())?;

    init_logger(&config.log)?;
    verbose!("[+] Logger initialized");

    verbose!("[+] Initializing storage...");
    let storage = new_storage(&config.storage).wrap_err("initializing storage")?;
    verbose!("[+] Storage initialized");

    let mut session = Session::new(LocalTranscript::default(), storage, config.session);
    let outcome = session.initialize();
    verbose!("[+] Session initialized: {:?}", outcome);

    let output = cmd.action().run(&mut session)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
