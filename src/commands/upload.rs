//! `upload`: push a file to the content-addressed store.

use std::path::Path;

use url::Url;

use crate::error::CliError;
use crate::ipfs;

pub async fn execute(api: &Url, file: &Path) -> Result<(), CliError> {
    let cid = ipfs::upload(api, file).await?;
    println!("File CID: {}", cid);
    Ok(())
}
