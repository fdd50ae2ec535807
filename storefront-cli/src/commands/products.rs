//! Product catalog commands

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use comfy_table::Cell;
use storefront_sdk::resources::products::parse_image_list;
use storefront_sdk::{Dimensions, NewProduct, PageRequest, Product, ProductUpdate};

use crate::commands::{confirm, next_page_hint, with_spinner};
use crate::context::Context;
use crate::output::{
    format_price, print_field, print_list_field, print_optional_field, print_section, stock_badge,
    TableDisplay,
};

/// Product catalog commands
#[derive(Debug, Args)]
pub struct ProductsCommands {
    #[command(subcommand)]
    pub command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsSubcommand {
    /// List one page of products
    List {
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,

        /// Products per page
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show product details
    Get {
        /// Product ID
        id: u64,
    },

    /// Create a product
    Create {
        /// Product title
        #[arg(long)]
        title: String,

        /// Unit price
        #[arg(long)]
        price: f64,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Update a product; only the given fields change
    Update {
        /// Product ID
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<f64>,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: u64,

        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Optional product attributes shared by create and update
#[derive(Debug, Default, Args)]
pub struct ProductFields {
    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Category slug
    #[arg(long)]
    pub category: Option<String>,

    /// Units in stock
    #[arg(long)]
    pub stock: Option<u32>,

    /// Discount percentage
    #[arg(long)]
    pub discount: Option<f64>,

    /// Brand name
    #[arg(long)]
    pub brand: Option<String>,

    /// Stock keeping unit
    #[arg(long)]
    pub sku: Option<String>,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Image URLs separated by commas or newlines
    #[arg(long)]
    pub images: Option<String>,

    /// Thumbnail URL
    #[arg(long)]
    pub thumbnail: Option<String>,

    /// Width in cm
    #[arg(long)]
    pub width: Option<f64>,

    /// Height in cm
    #[arg(long)]
    pub height: Option<f64>,

    /// Depth in cm
    #[arg(long)]
    pub depth: Option<f64>,
}

impl ProductFields {
    fn dimensions(&self) -> Option<Dimensions> {
        Dimensions::from_parts(self.width, self.height, self.depth)
    }

    fn images(&self) -> Option<Vec<String>> {
        self.images.as_deref().map(parse_image_list)
    }

    fn into_new_product(self, title: String, price: f64) -> NewProduct {
        let dimensions = self.dimensions();
        let images = self.images().unwrap_or_default();

        let mut product = NewProduct::new(title, price)
            .with_description(self.description.unwrap_or_default())
            .with_category(self.category.unwrap_or_default())
            .with_stock(self.stock.unwrap_or(0))
            .with_tags(self.tags.unwrap_or_default())
            .with_dimensions(dimensions)
            .with_images(images);
        product.discount_percentage = self.discount;
        product.brand = self.brand;
        product.sku = self.sku;
        product.thumbnail = self.thumbnail;
        product
    }

    fn into_update(self, title: Option<String>, price: Option<f64>) -> ProductUpdate {
        ProductUpdate {
            dimensions: self.dimensions(),
            images: self.images(),
            title,
            price,
            description: self.description,
            category: self.category,
            discount_percentage: self.discount,
            stock: self.stock,
            tags: self.tags,
            brand: self.brand,
            sku: self.sku,
            thumbnail: self.thumbnail,
        }
    }
}

/// Execute product commands
pub async fn execute(ctx: &Context, cmd: ProductsCommands) -> Result<()> {
    match cmd.command {
        ProductsSubcommand::List { page, limit } => list(ctx, page, limit).await,
        ProductsSubcommand::Get { id } => get(ctx, id).await,
        ProductsSubcommand::Create {
            title,
            price,
            fields,
        } => create(ctx, fields.into_new_product(title, price)).await,
        ProductsSubcommand::Update {
            id,
            title,
            price,
            fields,
        } => update(ctx, id, fields.into_update(title, price)).await,
        ProductsSubcommand::Delete { id, force } => delete(ctx, id, force).await,
    }
}

const LIST_HEADERS: &[&str] = &["ID", "Title", "Category", "Price", "Stock", "Brand"];

async fn list(ctx: &Context, page: Option<u32>, limit: Option<u32>) -> Result<()> {
    let client = ctx.create_client()?;
    let request = PageRequest {
        page,
        page_size: Some(ctx.page_size(limit)),
    };

    let page = with_spinner(ctx, "Fetching products...", client.products().list(request))
        .await
        .context("Request failed")?
        .into_result()
        .context("Failed to list products")?;

    ctx.output.write_page(&page, LIST_HEADERS)?;
    next_page_hint(ctx, &page.pagination);
    Ok(())
}

async fn get(ctx: &Context, id: u64) -> Result<()> {
    let client = ctx.create_client()?;
    let product = with_spinner(ctx, "Fetching product...", client.products().get(id))
        .await
        .context("Request failed")?
        .into_result()
        .with_context(|| format!("Failed to fetch product {}", id))?;

    ctx.output.write(&product)
}

async fn create(ctx: &Context, product: NewProduct) -> Result<()> {
    if product.title.trim().is_empty() {
        bail!("Title must not be empty");
    }
    if product.price < 0.0 {
        bail!("Price must not be negative");
    }

    let client = ctx.create_client()?;
    let created = with_spinner(ctx, "Creating product...", client.products().create(&product))
        .await
        .context("Request failed")?
        .into_result()
        .context("Failed to create product")?;

    ctx.output
        .success(&format!("Created product {} ({})", created.id, created.title));
    ctx.output.write(&created)
}

async fn update(ctx: &Context, id: u64, update: ProductUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update; pass at least one field");
    }

    let client = ctx.create_client()?;
    let updated = with_spinner(ctx, "Updating product...", client.products().update(id, &update))
        .await
        .context("Request failed")?
        .into_result()
        .with_context(|| format!("Failed to update product {}", id))?;

    ctx.output.success(&format!("Updated product {}", id));
    ctx.output.write(&updated)
}

async fn delete(ctx: &Context, id: u64, force: bool) -> Result<()> {
    if !confirm(format!("Delete product {}?", id), force)? {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let client = ctx.create_client()?;
    with_spinner(ctx, "Deleting product...", client.products().delete(id))
        .await
        .context("Request failed")?
        .into_result()
        .with_context(|| format!("Failed to delete product {}", id))?;

    ctx.output.success(&format!("Deleted product {}", id));
    Ok(())
}

impl TableDisplay for Product {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.id),
            Cell::new(&self.title),
            Cell::new(&self.category),
            Cell::new(format_price(self.price)),
            Cell::new(stock_badge(self.stock, self.is_low_stock())),
            Cell::new(self.brand.as_deref().unwrap_or("-")),
        ]
    }

    fn display_single(&self) {
        print_section("Product");
        print_field("ID", &self.id.to_string());
        print_field("Title", &self.title);
        print_field("Category", &self.category);
        print_optional_field("Brand", self.brand.as_deref());
        print_optional_field("SKU", self.sku.as_deref());
        print_field("Price", &format_price(self.price));
        if let (Some(original), Some(discount)) = (self.original_price(), self.discount_percentage) {
            print_field(
                "Discount",
                &format!("{}% off {}", discount, format_price(original)),
            );
        }
        print_field("Stock", &stock_badge(self.stock, self.is_low_stock()));
        print_optional_field("Availability", self.availability_status.as_deref());
        if let Some(rating) = self.rating {
            print_field("Rating", &format!("{:.1}", rating));
        }
        if let Some(d) = self.dimensions {
            print_field(
                "Dimensions",
                &format!("{} x {} x {} cm", d.width, d.height, d.depth),
            );
        }
        print_list_field("Tags", &self.tags);

        if !self.description.is_empty() {
            print_section("Description");
            println!("  {}", self.description);
        }
        if !self.images.is_empty() {
            print_section("Images");
            for url in &self.images {
                println!("  {}", url);
            }
        }
    }

    fn display_compact(&self) {
        println!(
            "{}\t{}\t{}\t{}",
            self.id,
            self.title,
            format_price(self.price),
            self.stock
        );
    }
}
