//! Cryptools command-line interface

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use error::CliResult;

#[derive(Parser)]
#[command(name = "cryptools")]
#[command(about = "Cryptography toolkit - digests, keys, encryption and signatures")]
#[command(version)]
struct Cli {
    /// Key store file for persisted keys
    #[arg(long, global = true, default_value = "cryptools-keys.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Digest files (each file reported independently)
    Digest {
        /// Files to digest
        files: Vec<PathBuf>,

        /// Hash algorithm (sha1, sha256, sha384, sha512)
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,

        /// Digest a literal string instead of files
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Generate random bytes or a UUID
    Random {
        /// Number of bytes
        #[arg(short, long, default_value_t = 32)]
        length: usize,

        /// Output encoding (hex or base64)
        #[arg(short, long, default_value = "hex")]
        encoding: String,

        /// Generate a version 4 UUID instead
        #[arg(long)]
        uuid: bool,
    },

    /// Generate a new key
    Generate {
        /// Key name
        #[arg(short, long)]
        name: String,

        /// Algorithm (aes-cbc, aes-ctr, aes-gcm, hmac, rsa-oaep, rsa-pkcs1, rsa-pss, ecdsa)
        #[arg(short, long)]
        algorithm: String,

        /// AES key length in bits
        #[arg(long, default_value_t = 256)]
        length: u32,

        /// Hash for HMAC and the RSA schemes
        #[arg(long, default_value = "sha256")]
        hash: String,

        /// Curve for ECDSA (p256, p384, p521)
        #[arg(long, default_value = "p256")]
        curve: String,

        /// RSA modulus length in bits
        #[arg(long, default_value_t = 2048)]
        modulus_length: usize,

        /// RSA public exponent
        #[arg(long, default_value_t = 65537)]
        exponent: u64,

        /// Write the key through to the key store
        #[arg(short, long)]
        persist: bool,
    },

    /// Import pasted or uploaded key material
    Import {
        /// Key name
        #[arg(short, long)]
        name: String,

        /// Key material (JWK, PEM, or encoded DER/raw bytes)
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the key material from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Algorithm for raw key bytes (same names as generate)
        #[arg(long)]
        raw_algorithm: Option<String>,

        /// AES key length for a raw AES key
        #[arg(long, default_value_t = 256)]
        length: u32,

        /// Hash for a raw HMAC key or an RSA scheme hint
        #[arg(long, default_value = "sha256")]
        hash: String,

        /// Curve for a raw ECDSA point
        #[arg(long, default_value = "p256")]
        curve: String,

        /// RSA scheme for DER-encoded RSA keys (oaep, pkcs1, pss)
        #[arg(long)]
        rsa_scheme: Option<String>,

        /// Write the key through to the key store
        #[arg(short, long)]
        persist: bool,
    },

    /// Export a key in every available format
    Export {
        /// Key name
        #[arg(short, long)]
        name: String,
    },

    /// List keys on the ring
    List,

    /// Delete a key
    Delete {
        /// Key name
        #[arg(short, long)]
        name: String,
    },

    /// Encrypt data with a named key
    Encrypt {
        /// Key name
        #[arg(short, long)]
        key: String,

        /// Plaintext string
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the plaintext from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Decrypt data with a named key
    Decrypt {
        /// Key name
        #[arg(short, long)]
        key: String,

        /// Base64 ciphertext
        #[arg(short, long)]
        input: String,

        /// Hex IV or counter block returned by encryption
        #[arg(long)]
        iv: Option<String>,
    },

    /// Sign data with a named key
    Sign {
        /// Key name
        #[arg(short, long)]
        key: String,

        /// Message string
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the message from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// RSA-PSS salt length in bytes (defaults to the digest size)
        #[arg(long)]
        salt_length: Option<usize>,
    },

    /// Verify a signature with a named key
    Verify {
        /// Key name
        #[arg(short, long)]
        key: String,

        /// Message string
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the message from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Base64 signature
        #[arg(short, long)]
        signature: String,

        /// RSA-PSS salt length in bytes (defaults to the digest size)
        #[arg(long)]
        salt_length: Option<usize>,
    },

    /// Derive a key from a password with PBKDF2
    Pbkdf2 {
        /// Password
        #[arg(short, long)]
        password: String,

        /// Salt string
        #[arg(short, long)]
        salt: String,

        /// Iteration count
        #[arg(short, long, default_value_t = 100_000)]
        iterations: u32,

        /// PRF hash (sha1, sha256, sha384, sha512)
        #[arg(long, default_value = "sha256")]
        hash: String,

        /// Derived key length in bytes
        #[arg(short, long, default_value_t = 32)]
        length: usize,
    },

    /// Hash or verify passwords with bcrypt
    Bcrypt {
        #[command(subcommand)]
        action: BcryptAction,
    },

    /// SRP password-authenticated registration
    Srp {
        #[command(subcommand)]
        action: SrpAction,
    },
}

#[derive(Subcommand)]
enum BcryptAction {
    /// Hash a password
    Hash {
        /// Password
        #[arg(short, long)]
        password: String,

        /// Cost factor
        #[arg(short, long, default_value_t = cryptools_crypto::password::DEFAULT_COST)]
        cost: u32,
    },

    /// Verify a password against a bcrypt hash
    Verify {
        /// Password
        #[arg(short, long)]
        password: String,

        /// Bcrypt hash string
        #[arg(long)]
        hash: String,
    },
}

#[derive(Subcommand)]
enum SrpAction {
    /// Compute a salt and verifier for registration
    Register {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Digest {
            files,
            algorithm,
            text,
        } => commands::digest::handle(files, algorithm, text),
        Commands::Random {
            length,
            encoding,
            uuid,
        } => commands::random::handle(length, encoding, uuid),
        Commands::Generate {
            name,
            algorithm,
            length,
            hash,
            curve,
            modulus_length,
            exponent,
            persist,
        } => commands::generate::handle(
            &cli.store,
            name,
            algorithm,
            length,
            hash,
            curve,
            modulus_length,
            exponent,
            persist,
        ),
        Commands::Import {
            name,
            text,
            file,
            raw_algorithm,
            length,
            hash,
            curve,
            rsa_scheme,
            persist,
        } => commands::import::handle(
            &cli.store,
            name,
            text,
            file,
            raw_algorithm,
            length,
            hash,
            curve,
            rsa_scheme,
            persist,
        ),
        Commands::Export { name } => commands::export::handle(&cli.store, name),
        Commands::List => commands::list::handle(&cli.store),
        Commands::Delete { name } => commands::delete::handle(&cli.store, name),
        Commands::Encrypt { key, text, file } => {
            commands::encrypt::handle(&cli.store, key, text, file)
        }
        Commands::Decrypt { key, input, iv } => {
            commands::decrypt::handle(&cli.store, key, input, iv)
        }
        Commands::Sign {
            key,
            text,
            file,
            salt_length,
        } => commands::sign::handle(&cli.store, key, text, file, salt_length),
        Commands::Verify {
            key,
            text,
            file,
            signature,
            salt_length,
        } => commands::verify::handle(&cli.store, key, text, file, signature, salt_length),
        Commands::Pbkdf2 {
            password,
            salt,
            iterations,
            hash,
            length,
        } => commands::pbkdf2::handle(password, salt, iterations, hash, length),
        Commands::Bcrypt { action } => match action {
            BcryptAction::Hash { password, cost } => commands::bcrypt::hash(password, cost),
            BcryptAction::Verify { password, hash } => commands::bcrypt::verify(password, hash),
        },
        Commands::Srp { action } => match action {
            SrpAction::Register { username, password } => {
                commands::srp::register(username, password)
            }
        },
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
