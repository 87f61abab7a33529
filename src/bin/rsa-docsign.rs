use clap::{Parser, Subcommand};
use log::{debug, info};
use rsa_docsign::{
    verify_file, CreateKeysResponse, KeyPair, OutputConfig, PrivateKey, SignError, SignResponse,
    Signer, VerificationReason, VerifyResponse,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "rsa-docsign",
    version,
    about = "Sign documents and verify signatures with RSA keys"
)]
struct Cli {
    /// Print the service JSON payload instead of a status line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a key pair and write private_key.pem and public_key.pem
    CreateKeys {
        /// Output directory (defaults to $DOCSIGN_OUT_DIR, then ".")
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Sign a document and write hash.txt and signature.txt
    Sign {
        /// Document to sign
        #[arg(long)]
        file: PathBuf,
        /// PKCS#8 private key file
        #[arg(long)]
        private_key: PathBuf,
        /// Output directory (defaults to $DOCSIGN_OUT_DIR, then ".")
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Check a document against its hash and signature files
    Verify {
        /// Document to verify
        #[arg(long)]
        file: PathBuf,
        /// SPKI public key file
        #[arg(long)]
        public_key: PathBuf,
        /// Hex digest file
        #[arg(long)]
        hash: PathBuf,
        /// Base64 signature file
        #[arg(long)]
        signature: PathBuf,
    },
}

fn verdict_message(reason: VerificationReason) -> &'static str {
    match reason {
        VerificationReason::Ok => "Verification succeeded: the signature is valid.",
        VerificationReason::HashMismatch => "Verification failed: the data has been modified.",
        VerificationReason::SignatureInvalid => {
            "Verification failed: the signature does not match this public key."
        }
        VerificationReason::MalformedInput => {
            "Verification failed: the key, hash or signature could not be decoded."
        }
    }
}

/// Read a text artifact for verification. Bytes that are not UTF-8 are
/// replaced, so a garbage file is judged by the verifier instead of failing
/// the read.
fn read_artifact(path: &Path) -> Result<String, SignError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run(cli: Cli) -> Result<ExitCode, SignError> {
    match cli.command {
        Command::CreateKeys { out_dir } => {
            let config = OutputConfig::resolve(out_dir);
            let keypair = KeyPair::generate()?;
            let (private_path, public_path) = keypair.save_to_dir(&config)?;
            info!(
                "Wrote {} and {}",
                private_path.display(),
                public_path.display()
            );
            if cli.json {
                let payload = CreateKeysResponse::from(&keypair);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Keys created: public and private key have been saved.");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Sign {
            file,
            private_key,
            out_dir,
        } => {
            let config = OutputConfig::resolve(out_dir);
            let key = PrivateKey::load_from_file(&private_key)?;
            let signed = Signer::new(&key).sign_file(&file)?;
            let (hash_path, signature_path) = signed.save_artifacts(&config)?;
            info!(
                "Wrote {} and {}",
                hash_path.display(),
                signature_path.display()
            );
            if cli.json {
                let payload = SignResponse::from(&signed);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Data signed: hash and signature files have been saved.");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            file,
            public_key,
            hash,
            signature,
        } => {
            let public_key_pem = read_artifact(&public_key)?;
            let claimed_digest = read_artifact(&hash)?;
            let claimed_signature = read_artifact(&signature)?;
            let result =
                verify_file(&public_key_pem, &file, &claimed_digest, &claimed_signature)?;
            debug!("Verification of {} finished: {}", file.display(), result.reason);
            if cli.json {
                let payload = VerifyResponse::from(result);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", verdict_message(result.reason));
            }
            Ok(if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}
