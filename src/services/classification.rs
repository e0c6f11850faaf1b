use anyhow::Result;
use log::{info, warn};

use crate::database::{self, DbConn, Purchase};
use crate::llm::prompt::{build_base_prompt, purchase_prompt};
use crate::llm::{CategoryIdExtractor, CompletionClient};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClassificationSummary {
    pub assigned: usize,
    pub skipped: usize,
}

/// Asks a language model to categorize every unassigned purchase.
pub struct ClassificationService<C> {
    client: C,
    extractor: CategoryIdExtractor,
}

impl<C: CompletionClient> ClassificationService<C> {
    pub fn new(client: C) -> Result<Self> {
        Ok(Self {
            client,
            extractor: CategoryIdExtractor::new()?,
        })
    }

    /// A purchase the model cannot place is logged and left unassigned; only
    /// failures to read the work list abort the run.
    pub async fn run(&self, conn: &mut DbConn) -> Result<ClassificationSummary> {
        info!("=== Starting Classification ===");

        let purchases = database::purchases::list_unassigned(conn)?;
        let categories = database::categories::list_all(conn)?;
        if categories.is_empty() {
            anyhow::bail!("No categories found in database");
        }
        info!("  → {} unassigned purchases, {} categories", purchases.len(), categories.len());

        let base_prompt = build_base_prompt(&categories);
        let mut summary = ClassificationSummary::default();

        for purchase in &purchases {
            match self.classify_one(conn, &base_prompt, purchase).await {
                Ok(()) => summary.assigned += 1,
                Err(e) => {
                    warn!("Skipping '{}' bought for {}: {:#}", purchase.product, purchase.price, e);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "=== Classification Complete: {} assigned, {} skipped ===",
            summary.assigned, summary.skipped
        );
        Ok(summary)
    }

    async fn classify_one(
        &self,
        conn: &mut DbConn,
        base_prompt: &str,
        purchase: &Purchase,
    ) -> Result<()> {
        let reply = self
            .client
            .complete(&purchase_prompt(base_prompt, purchase))
            .await?;

        let category_id = self.extractor.extract(&reply)?;
        let category_name = database::categories::find_name_by_id(conn, category_id)?;
        info!(
            "Parsed category ID: {}, category name: {} for purchase {} bought for {}",
            category_id, category_name, purchase.product, purchase.price
        );

        database::purchases::set_category(conn, purchase.id, category_id)
    }
}
