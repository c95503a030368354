use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "delivery_lambda";
const LAMBDA_BINARIES: [&str; 2] = ["create_delivery", "list_deliveries"];

#[derive(Parser)]
#[command(name = "xtask", about = "Packaging tasks for the delivery lambdas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every delivery lambda and zip each one as a `bootstrap` artifact
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifacts
        #[arg(long, default_value = "dist")]
        dist_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

fn build_lambdas(target: &str, profile: BuildProfile) {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for bin in LAMBDA_BINARIES {
        args.extend(["--bin", bin]);
    }
    if matches!(profile, BuildProfile::Release) {
        args.push("--release");
    }

    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(&args)
        .status()
        .expect("failed to execute cargo");
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

/// Writes `binary_path` into a fresh zip as the executable `bootstrap` entry
/// the `provided.al2023` runtime launches.
fn zip_bootstrap(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path)
        .unwrap_or_else(|error| panic!("missing lambda binary '{}': {error}", binary_path.display()));
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

fn package_lambdas(target: &str, profile: BuildProfile, dist_dir: &Path) {
    build_lambdas(target, profile);

    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    fs::create_dir_all(dist_dir).expect("failed to create dist directory");

    for bin in LAMBDA_BINARIES {
        let zip_path = dist_dir.join(format!("{bin}.zip"));
        zip_bootstrap(&target_dir.join(bin), &zip_path);
        eprintln!("packaged {}", zip_path.display());
    }
}

fn main() {
    match Cli::parse().command {
        Commands::ServerlessPackage {
            target,
            profile,
            dist_dir,
        } => package_lambdas(&target, profile, &dist_dir),
    }
}
