use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::io::{BufRead, Write};

use crate::config::settings::AssignSettings;
use crate::database::{self, Category, CategoryId, DbConn};
use crate::input::InputValidator;

/// Walks through unassigned purchases and asks the user for a category.
pub struct AssignmentService {
    settings: AssignSettings,
}

impl AssignmentService {
    pub fn new(settings: AssignSettings) -> Self {
        Self { settings }
    }

    /// Returns how many purchases were assigned.
    pub fn run<R: BufRead, W: Write>(
        &self,
        conn: &mut DbConn,
        validator: &mut InputValidator<R, W>,
    ) -> Result<usize> {
        let categories = database::categories::list_all(conn)?;
        let (min_id, max_id) = id_range(&categories)
            .ok_or_else(|| anyhow::anyhow!("No categories found in database"))?;

        print_categories(&categories, validator.output())?;

        let purchases = database::purchases::list_unassigned(conn)
            .context("Getting unassigned purchases failed")?;

        if purchases.is_empty() {
            writeln!(validator.output(), "No unassigned purchases found.")?;
            return Ok(0);
        }

        let total = purchases.len();
        for (idx, purchase) in purchases.iter().enumerate() {
            write!(
                validator.output(),
                "[{}/{}] Which category does '{}' (£{}) belong to? ",
                idx + 1,
                total,
                purchase.product,
                purchase.price
            )?;
            validator.output().flush()?;

            let category_id = validator
                .read_category_id(min_id, max_id, self.settings.max_attempts)
                .with_context(|| format!("Failed to read category ID for '{}'", purchase.product))?;

            database::purchases::set_category(conn, purchase.id, category_id)
                .context("Changing purchase category failed")?;

            writeln!(
                validator.output(),
                "Assigned '{}' to category {}\n",
                purchase.product,
                category_id
            )?;
            info!("Purchase {} assigned to category {}", purchase.id, category_id);
        }

        writeln!(
            validator.output(),
            "{}",
            format!("Successfully assigned {} purchases!", total).green()
        )?;
        Ok(total)
    }
}

fn id_range(categories: &[Category]) -> Option<(CategoryId, CategoryId)> {
    let min = categories.iter().map(|c| c.id).min()?;
    let max = categories.iter().map(|c| c.id).max()?;
    Some((min, max))
}

fn print_categories<W: Write>(categories: &[Category], out: &mut W) -> Result<()> {
    writeln!(out, "\nAssign the purchase to one of these categories: ")?;
    for category in categories {
        writeln!(out, "  [{}] {}", category.id, category.name.bold())?;
    }
    writeln!(out)?;
    Ok(())
}
