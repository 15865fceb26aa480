use anyhow::{Context, Result};
use parish_bulletin_config::Config;
use parish_bulletin_engine::{
    Document, build,
    io::{self, TemplateStore},
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

mod preview;

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {program} build <input.json> [output.json]");
    eprintln!("  {program} preview <input.json>");
    eprintln!("  {program} templates [list | show <name> | save <name> <file> | delete <name>]");
    process::exit(1);
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("parish-bulletin");
    let config = load_config();

    match args.get(1).map(String::as_str) {
        Some("build") => match &args[2..] {
            [input] => build_to(&config, Path::new(input), None),
            [input, output] => build_to(&config, Path::new(input), Some(PathBuf::from(output))),
            _ => usage(program),
        },
        Some("preview") => match &args[2..] {
            [input] => {
                let input = Path::new(input);
                let document = build_document(&config, input)?;
                preview::run(input.display().to_string(), &document)
            }
            _ => usage(program),
        },
        Some("templates") => templates(&config, &args[2..]).unwrap_or_else(|| usage(program)),
        _ => usage(program),
    }
}

/// The config file if there is one, otherwise defaults relative to the
/// working directory.
fn load_config() -> Config {
    match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!(
                "no config at {}, using defaults",
                Config::config_path().display()
            );
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }
}

fn build_document(config: &Config, input: &Path) -> Result<Document> {
    let data = io::read_bulletin(input)
        .with_context(|| format!("reading bulletin {}", input.display()))?;
    let latest = io::save_latest(&data, &config.templates_path)?;
    log::info!("saved payload to {}", latest.display());
    Ok(build(&data, &config.build_options())?)
}

fn build_to(config: &Config, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let document = build_document(config, input)?;
    let output = output.unwrap_or_else(|| default_output(config, input));
    io::write_document(&document, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn default_output(config: &Config, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bulletin".to_string());
    config.output_path.join(format!("{stem}.document.json"))
}

/// `None` when the arguments don't form a templates command.
fn templates(config: &Config, args: &[String]) -> Option<Result<()>> {
    let store = TemplateStore::new(&config.templates_path);
    let result = match args {
        [] => list_templates(&store),
        [cmd] if cmd == "list" => list_templates(&store),
        [cmd, name] if cmd == "show" => store
            .load(name)
            .map_err(anyhow::Error::from)
            .and_then(|template| Ok(serde_json::to_string_pretty(&template)?))
            .map(|json| println!("{json}")),
        [cmd, name, file] if cmd == "save" => save_template(&store, name, Path::new(file)),
        [cmd, name] if cmd == "delete" => store
            .delete(name)
            .map(|()| println!("Deleted {name}"))
            .map_err(Into::into),
        _ => return None,
    };
    Some(result)
}

fn list_templates(store: &TemplateStore) -> Result<()> {
    let names = store.list()?;
    if names.is_empty() {
        println!("No templates in {}", store.root().display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn save_template(store: &TemplateStore, name: &str, file: &Path) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let template: serde_json::Value = serde_json::from_str(&content)?;
    let saved = store.save(name, &template)?;
    println!("Saved template {saved}");
    Ok(())
}
