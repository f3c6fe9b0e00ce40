use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use rootcause::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wrfdb::data::{Collection, DataStore, StoreLayout, VersionKey};
use wrfdb::descriptor::{describe, page_ref};
use wrfdb::enrich::enrich_talents;
use wrfdb::localization::{LocalizationKey, Localizer, localized_or_default};
use wrfdb::objects::types::{ModuleStat, Pilot, PilotTalent};
use wrfdb::stat::stat_value_choices;
use wrfdb::versions::VersionCatalog;

/// Inspect a versioned War Robots: Frontiers data repository
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the data repository (the directory holding versions.json)
    #[arg(long, env = "WRFDB_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Log debug output, including every file read
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known versions, newest first
    Versions,
    /// Print one object's display descriptor and raw record
    Show {
        collection: String,
        id: String,
        /// Version to read from. Defaults to the latest
        #[arg(long)]
        version: Option<String>,
        /// Resolve display text through this language's localization table
        #[arg(long)]
        lang: Option<String>,
    },
    /// List every (id, version) page of a collection
    Paths {
        collection: String,
        /// Include objects that are not production-ready
        #[arg(long)]
        all: bool,
        /// Read every version instead of the precomputed summary
        #[arg(long)]
        scan: bool,
    },
    /// List pilot talents with the pilot level that unlocks them
    Talents {
        #[arg(long)]
        version: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn resolve_version(catalog: &VersionCatalog, requested: Option<&str>) -> Result<VersionKey, Report> {
    match requested {
        Some(key) => Ok(VersionKey::parse(key)?),
        None => match catalog.latest() {
            Some(latest) => Ok(latest.clone()),
            None => bail!("the version catalog is empty"),
        },
    }
}

fn print_versions(store: &DataStore) -> Result<(), Report> {
    let catalog = VersionCatalog::load(store)?;
    let latest = catalog.latest();

    for (key, info) in catalog.iter() {
        let marker = if Some(key) == latest { "*" } else { " " };
        let season = if info.is_season_release == Some(true) {
            " [season]"
        } else {
            ""
        };
        println!("{marker} {key}  {}{season}", info.title);
    }
    Ok(())
}

fn display_text(key: &LocalizationKey, localizer: Option<&dyn Localizer>) -> Result<String, Report> {
    let text = match localizer {
        Some(localizer) => localized_or_default(key, localizer)?,
        None => key.default_string()?.to_string(),
    };
    Ok(text)
}

fn show_object(
    store: &DataStore,
    collection: &str,
    id: &str,
    version: Option<&str>,
    lang: Option<&str>,
) -> Result<(), Report> {
    let catalog = VersionCatalog::load(store)?;
    let version = resolve_version(&catalog, version)?;
    let record = store
        .load_one(id, &version, collection)
        .context_with(|| format!("Failed to load {collection} {id}"))?;

    let table = match lang {
        Some(lang) => store.load_localization(&version, lang)?,
        None => None,
    };
    let localizer = table.as_ref().map(|table| table as &dyn Localizer);

    println!("{} {id} @ {version}", record.collection_type().name());
    if let Some(url) = record.collection_url() {
        println!("page: /{url}/{version}/{id}");
    }
    if let Some(latest) = store.latest_version_for_object(id, collection) {
        println!("last changed: {latest}");
    }

    match record.to_object() {
        Ok(object) => {
            match describe(&object) {
                Ok(descriptor) => {
                    println!("text: {}", display_text(descriptor.text, localizer)?);
                    println!("icon: {}", descriptor.icon_path);
                    if let Some(color) = descriptor.color {
                        println!("color: {color}");
                    }
                    if let Some(hover) = descriptor.hover {
                        println!("hover: {}", display_text(hover, localizer)?);
                    }
                }
                Err(err) => match page_ref(&object) {
                    Ok(page) => println!("text: {}", display_text(page.text, localizer)?),
                    Err(_) => debug!("no descriptor for {id}: {err}"),
                },
            }

            if let Some(talent) = object.pilot_talent_ref() {
                print_talent_details(store, &version, talent)?;
            }
        }
        Err(err) => debug!("no typed view of {id}: {err}"),
    }

    println!("{}", serde_json::to_string_pretty(&record.to_json())?);
    Ok(())
}

fn print_talent_details(
    store: &DataStore,
    version: &VersionKey,
    talent: &PilotTalent,
) -> Result<(), Report> {
    let pilots: Collection<Pilot> = store.load_typed("Pilot", version)?;
    let single: Collection<PilotTalent> = [(talent.id.clone(), talent.clone())].into_iter().collect();
    let enriched = enrich_talents(&single, &pilots);
    if let Some(enriched) = enriched.get(talent.id.as_str()) {
        if enriched.is_granted() {
            println!("unlocked at level {} ({})", enriched.level, enriched.talent_type_id);
        } else {
            println!("not granted by any pilot");
        }
    }

    let module_stats: Collection<ModuleStat> = store.load_typed("ModuleStat", version)?;
    for (stat_id, choice) in stat_value_choices(&talent.stats, &module_stats)?.iter() {
        let unit = match choice.unit_name {
            Some(unit) => unit.default_string()?,
            None => "",
        };
        if let Some(formatted) = choice.format(0, unit) {
            println!("{stat_id}: {formatted}");
        }
    }
    Ok(())
}

fn print_paths(store: &DataStore, collection: &str, all: bool, scan: bool) -> Result<(), Report> {
    let paths = if scan {
        store.scan_changes(collection, !all)?
    } else {
        store.index_changes(collection, !all)?
    };

    for path in &paths {
        println!(
            "{}\t{}\t{}",
            path.id,
            path.version,
            path.versions.iter().join(",")
        );
    }
    debug!("{} paths for {collection}", paths.len());
    Ok(())
}

fn print_talents(store: &DataStore, version: Option<&str>) -> Result<(), Report> {
    let catalog = VersionCatalog::load(store)?;
    let version = resolve_version(&catalog, version)?;

    let talents: Collection<PilotTalent> = store.load_typed("PilotTalent", &version)?;
    let pilots: Collection<Pilot> = store.load_typed("Pilot", &version)?;

    for (id, talent) in enrich_talents(&talents, &pilots).iter() {
        let name = talent.talent.name.default_string().unwrap_or(id.as_str());
        println!(
            "{id}\t{}\t{}\t{name}",
            talent.level, talent.talent_type_id
        );
    }
    Ok(())
}

fn main() -> Result<(), Report> {
    let args = Args::parse();
    init_logging(args.verbose);

    let store = DataStore::open(&args.data_dir, StoreLayout::default());
    debug!("reading data from {}", args.data_dir.display());

    match &args.command {
        Commands::Versions => print_versions(&store),
        Commands::Show {
            collection,
            id,
            version,
            lang,
        } => show_object(
            &store,
            collection,
            id,
            version.as_deref(),
            lang.as_deref(),
        ),
        Commands::Paths {
            collection,
            all,
            scan,
        } => print_paths(&store, collection, *all, *scan),
        Commands::Talents { version } => print_talents(&store, version.as_deref()),
    }
}
