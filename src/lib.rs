//! Launcher - run deployment scripts with an on-demand deployer key.
//!
//! Scripts targeting a local chain run straight away. Scripts targeting any
//! other network need the deployer key: it is decrypted with a passphrase
//! and handed to that one child process only.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Run a script
//! │   ├── import        # Encrypt a key into .env
//! │   ├── prompt        # Terminal passphrase prompt
//! │   └── output        # Styled messages
//! └── core/             # Core library components
//!     ├── config        # launcher.toml
//!     ├── network       # Local vs remote network resolution
//!     ├── keystore      # Encrypted key lookup and unlock
//!     ├── cipher        # age passphrase encryption, JSON keystores
//!     ├── dispatch      # Child process with scoped environment
//!     ├── launcher      # Invocation flow
//!     └── env_file      # .env parsing
//! ```

pub mod cli;
pub mod core;
pub mod error;
