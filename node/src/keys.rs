//! Key files.
//!
//! A key file holds one hex-encoded Ed25519 seed and nothing else. The MSP
//! id is not stored with it; callers supply it on the command line.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;

use quill_protocol::crypto::SoftwareCsp;
use quill_protocol::envelope::NonceSource;
use quill_protocol::identity::{LocalIdentity, LocalSigner};

use crate::cli::IdentityArgs;

/// Writes `identity`'s seed to `path`, owner-readable only on Unix.
pub fn write_key(path: &Path, identity: &LocalIdentity, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(path, identity.seed_hex())
        .with_context(|| format!("failed to write key to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions on {}", path.display()))?;
    }
    Ok(())
}

pub fn load_identity(args: &IdentityArgs) -> Result<LocalIdentity> {
    let seed_hex = std::fs::read_to_string(&args.key)
        .with_context(|| format!("failed to read key file {}", args.key.display()))?;
    LocalIdentity::from_hex(args.msp_id.clone(), &seed_hex)
        .with_context(|| format!("invalid key in {}", args.key.display()))
}

/// The identity wrapped with a software nonce source.
pub fn load_signer(args: &IdentityArgs) -> Result<LocalSigner> {
    let identity = load_identity(args)?;
    Ok(LocalSigner::new(
        Arc::new(identity),
        NonceSource::new(Arc::new(SoftwareCsp::default())),
    ))
}
