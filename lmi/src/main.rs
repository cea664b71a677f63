mod choose;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use console::style;

use nskube::gcloud::DEFAULT_REQUEST_TIMEOUT;
use nskube::{
    connect, default_store_path, load, resolve, save, scan, Chooser, GcloudProvider, Registry,
    ResolveError, ResolveHints, ScanOptions,
};

use crate::choose::{registry_table, PromptChooser};

/// Quickly connect to a kubernetes namespace without remembering which gcloud project
/// and cluster it lives in.
#[derive(Parser, Debug)]
#[clap(name = "lmi", version)]
struct Cli {
    /// Namespace to connect to
    #[clap(value_name = "NAMESPACE")]
    target: Option<String>,

    /// Namespace to connect to, if not given as an argument
    #[clap(short, long)]
    namespace: Option<String>,

    /// Cluster to connect to, needed when the namespace exists in more than one cluster.
    /// Any cluster containing this text matches.
    #[clap(short, long)]
    cluster: Option<String>,

    /// Project to connect to when the namespace exists in more than one project,
    /// or the only project to scan
    #[clap(short, long)]
    project: Option<String>,

    /// Scan all projects (or only --project) and store every namespace found
    #[clap(short, long)]
    scan: bool,

    /// Print every known namespace and where it lives
    #[clap(long, conflicts_with = "scan")]
    list: bool,

    /// Namespace store location [default: ~/.lmi/namespaces.yaml]
    #[clap(long, env = "LMI_STORE")]
    store: Option<PathBuf>,

    #[clap(long, env = "LMI_GCLOUD", default_value = "gcloud")]
    gcloud: String,

    #[clap(long, env = "LMI_KUBECTL", default_value = "kubectl")]
    kubectl: String,

    /// How long to wait for a cluster to list its namespaces
    #[clap(long, env = "LMI_REQUEST_TIMEOUT", default_value = DEFAULT_REQUEST_TIMEOUT)]
    request_timeout: String,

    /// Log every command that is run
    #[clap(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[clap(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ResolveError>())
        .map_or(1, ResolveError::exit_code)
}

fn run_scan(
    provider: &mut GcloudProvider,
    store_path: &Path,
    project: Option<String>,
) -> anyhow::Result<()> {
    // Scanning one project merges into the store; a full scan rebuilds it, dropping stale targets.
    let mut registry = if project.is_some() {
        load(store_path)?
    } else {
        Registry::new()
    };

    let report = scan(provider, &mut registry, &ScanOptions { project });

    for (step, err) in &report.failures {
        println!("{} {step}: {err}", style('✗').red());
    }
    if report.reached_nothing() {
        bail!(
            "Scan could not reach any project, {} left untouched",
            store_path.display()
        );
    }

    save(&registry, store_path)
        .with_context(|| format!("Saving scan results to {}", store_path.display()))?;

    println!(
        "Scanned {} projects and {} clusters, found {} namespaces ({} known).",
        report.projects,
        report.clusters,
        report.namespaces,
        registry.len()
    );

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let store_path = cli.store.clone().unwrap_or_else(default_store_path);
    let mut provider = GcloudProvider {
        gcloud: cli.gcloud,
        kubectl: cli.kubectl,
        request_timeout: cli.request_timeout,
    };

    if cli.scan {
        return run_scan(&mut provider, &store_path, non_empty(cli.project));
    }

    let registry = load(&store_path)?;

    if cli.list {
        print!("{}", registry_table(&registry));
        return Ok(());
    }

    let namespace = match non_empty(cli.target.or(cli.namespace)) {
        Some(namespace) => namespace,
        None => {
            Cli::command().print_help()?;
            bail!("Pass a namespace to connect to, or --scan");
        }
    };

    let hints = ResolveHints {
        cluster: non_empty(cli.cluster),
        project: non_empty(cli.project),
    };
    let mut prompt = PromptChooser;
    let chooser: Option<&mut dyn Chooser> = if console::user_attended() {
        Some(&mut prompt)
    } else {
        None
    };

    let target = resolve(&registry, &namespace, &hints, chooser)?;
    let report = connect(&mut provider, target, &namespace);

    if !report.is_connected() {
        for (step, err) in &report.failures {
            println!("{} {step}: {err}", style('✗').red());
        }
        bail!(
            "Could not fully switch to {namespace} on {} ({}), kubectl may point somewhere else",
            target.cluster,
            target.project
        );
    }

    println!(
        "You are now connected to:\n- namespace: {}\n- cluster: {}\n- project: {}",
        style(&namespace).green().bold(),
        target.cluster,
        target.project
    );

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", style("error:").red().bold());
        std::process::exit(exit_code(&err));
    }
}
