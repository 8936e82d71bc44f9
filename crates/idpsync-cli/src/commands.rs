//! Subcommand implementations

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use idpsync_core::{ClusterId, DesiredUserSet, IdentityProviderId};
use idpsync_identity::{update_htpasswd, HtpasswdSpec};
use idpsync_ocm::Connection;

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Cluster that owns the identity provider
    #[arg(long)]
    pub cluster: ClusterId,

    /// Identity provider whose htpasswd users are managed
    #[arg(long)]
    pub idp: IdentityProviderId,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// JSON file of the form {"users": [{"username": "...", "password": "..."}]}
    #[arg(long)]
    pub users: PathBuf,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

fn load_desired_users(path: &Path) -> Result<DesiredUserSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let spec: HtpasswdSpec = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let users = DesiredUserSet::try_from(spec)
        .with_context(|| format!("Invalid users in {}", path.display()))?;
    Ok(users)
}

pub async fn apply(connection: &Connection, args: ApplyArgs) -> Result<()> {
    let users = load_desired_users(&args.users)?;
    info!(
        "Applying {} htpasswd users to identity provider {} on cluster {}",
        users.len(),
        args.target.idp,
        args.target.cluster
    );

    let client = connection
        .clusters_mgmt()
        .cluster(&args.target.cluster)
        .identity_providers();

    update_htpasswd(&users, &args.target.idp, &client)
        .await
        .context("Failed to update htpasswd users")?;

    println!("{}", import_summary(&args.target.idp, users.len()));
    Ok(())
}

fn import_summary(idp_id: &IdentityProviderId, entries: usize) -> String {
    format!(
        "Imported {} htpasswd user entries into identity provider {}",
        entries, idp_id
    )
}

pub async fn list(connection: &Connection, args: ListArgs) -> Result<()> {
    let users = connection
        .clusters_mgmt()
        .cluster(&args.target.cluster)
        .identity_providers()
        .identity_provider(&args.target.idp)
        .htpasswd_users()
        .list_all()
        .await
        .context("Failed to list htpasswd users")?;

    for user in &users {
        println!("{}", user.username);
    }
    Ok(())
}
