use tokenplan::billing::QuoteRequest;
use tokenplan::cli::Cli;
use tokenplan::config::Config;
use tokenplan::report::{renderer, CatalogView, Report};
use tokenplan::utils::canonicalize_usage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    let config_path = cli
        .config_file
        .clone()
        .unwrap_or_else(Config::get_config_path);

    // Handle configuration commands
    if cli.init {
        Config::init(&config_path)?;
        return Ok(());
    }

    let config = match &cli.config_file {
        Some(path) => Config::load_or_default(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        if let Err(e) = config.check() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        println!("✓ Configuration valid");
        return Ok(());
    }

    // Catalogs are validated once here and passed into every computation
    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let output = renderer(cli.json);

    if cli.list_services || cli.list_plans {
        if cli.list_services {
            println!("{}", output.render_catalog(&catalog, CatalogView::Services)?);
        }
        if cli.list_plans {
            println!("{}", output.render_catalog(&catalog, CatalogView::Plans)?);
        }
        return Ok(());
    }

    if !cli.has_quote_input() {
        eprintln!("Error: no usage given. Pass --usage \"Service=COUNT\" or --usage-file PATH");
        eprintln!("Run with --list-services to see the billable services");
        std::process::exit(2);
    }

    let report = cli.to_request().and_then(|mut request: QuoteRequest| {
        canonicalize_usage(&catalog.services, &mut request);
        Report::build(&catalog, &config.defaults, &request, cli.compare)
    });

    match report.and_then(|report| output.render(&report)) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
