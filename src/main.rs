use anyhow::Context;
use clap::Parser;
use contact_book::utils::logger::{self, LogTarget};
use contact_book::utils::validation::Validate;
use contact_book::{
    AppConfig, CliConfig, ConsoleFrontend, ContactError, ContactStore, Frontend, UiMode,
    XmlFileRepository,
};

fn exit_with(e: &ContactError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 合併命令列與設定檔
    let config = match AppConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 初始化日誌
    let target = match (&config.log_file, config.ui) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, UiMode::Tui) => LogTarget::Silent,
        (None, UiMode::Console) => LogTarget::Stderr,
    };
    logger::init_cli_logger(config.verbose, target).context("failed to open log file")?;

    tracing::info!("Starting contact-book");
    tracing::debug!("Config: {:?}", config);

    // 載入聯絡人
    let repository = XmlFileRepository::new(config.data_file.clone());
    tracing::info!("📁 Contact file: {}", repository.path().display());
    let mut store = ContactStore::new(repository);
    store.load();

    let result = match config.ui {
        UiMode::Console => {
            let stdin = std::io::stdin();
            let mut frontend = ConsoleFrontend::new(stdin.lock(), std::io::stdout());
            frontend.run(&mut store)
        }
        #[cfg(feature = "tui")]
        UiMode::Tui => contact_book::TuiFrontend::new().run(&mut store),
        #[cfg(not(feature = "tui"))]
        UiMode::Tui => Err(ContactError::ConfigError {
            message: "this build does not include the terminal UI".to_string(),
        }),
    };

    if let Err(e) = result {
        tracing::error!("❌ Front end stopped: {}", e);
        exit_with(&e);
    }

    tracing::info!("Goodbye");
    Ok(())
}
