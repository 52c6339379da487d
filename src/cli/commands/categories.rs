//! Categories command implementation
//!
//! Lists the document categories in run order with the key accepted by
//! `--category` and `output.categories`, and the folder they export to.

use crate::domain::Category;
use clap::Args;
use std::fmt::Write as _;

/// Arguments for the categories command
#[derive(Args, Debug)]
pub struct CategoriesArgs {}

impl CategoriesArgs {
    /// Execute the categories command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        print!("{}", render_categories());
        Ok(0)
    }
}

fn render_categories() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<22} {:<32} FOLDER", "KEY", "NAME");
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "{:<22} {:<32} {}",
            category.key(),
            category.display_name(),
            category.root_folder().unwrap_or("(application folder)")
        );
    }
    out
}
