mod client;
mod package;

pub use client::AnkiConnectClient;
pub use package::write_package;

use std::path::Path;

use anyhow::Result;
use lexika_types::NoteFields;

/// Exports rendered notes, either live through AnkiConnect or to a portable
/// package file when an output path is given.
pub struct AnkiExporter {
    client: AnkiConnectClient,
}

impl AnkiExporter {
    pub fn new(connect_url: &str) -> Self {
        Self {
            client: AnkiConnectClient::new(connect_url.to_string()),
        }
    }

    pub async fn export(
        &self,
        notes: &[NoteFields],
        deck_name: &str,
        model_name: &str,
        output_path: Option<&Path>,
    ) -> Result<bool> {
        if let Some(path) = output_path {
            write_package(notes, deck_name, path)?;
            tracing::info!("wrote {} notes to package {}", notes.len(), path.display());
            return Ok(true);
        }

        if let Err(e) = self.client.create_deck(deck_name).await {
            tracing::error!("failed to create deck '{deck_name}': {e}");
            return Ok(false);
        }

        match self.client.add_notes(deck_name, model_name, notes).await {
            Ok(ids) => {
                let added = ids.iter().filter(|id| id.is_some()).count();
                tracing::info!("added {added}/{} notes to '{deck_name}'", notes.len());
                Ok(added > 0 || notes.is_empty())
            }
            Err(e) => {
                tracing::error!("failed to export notes: {e}");
                Ok(false)
            }
        }
    }
}
