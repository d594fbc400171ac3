//! Admin inventory manager.
//!
//! Every mutation is a form POST followed by a 303 back to `/admin`, so the
//! page always re-reads the store and the create form renders empty again.

use crate::handlers::common::validate_input;
use crate::handlers::inventory::{InventoryHandlerState, InventoryItem};
use crate::services::inventory::InventoryDraft;
use crate::views::layout::page;
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use maud::{html, Markup};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{error, warn};

/// The single page-level failure shown in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminError {
    Load,
    Add,
    Delete,
}

impl AdminError {
    pub fn message(self) -> &'static str {
        match self {
            AdminError::Load => "Failed to load inventory. Please try again later.",
            AdminError::Add => "Failed to add item. Please try again.",
            AdminError::Delete => "Failed to delete item. Please try again.",
        }
    }

    fn redirect(self) -> Redirect {
        let kind = match self {
            AdminError::Load => "load",
            AdminError::Add => "add",
            AdminError::Delete => "delete",
        };
        Redirect::to(&format!("/admin?error={kind}"))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub error: Option<String>,
}

impl AdminQuery {
    fn error(&self) -> Option<AdminError> {
        match self.error.as_deref()? {
            "load" => Some(AdminError::Load),
            "add" => Some(AdminError::Add),
            "delete" => Some(AdminError::Delete),
            _ => None,
        }
    }
}

/// Create form as posted by the browser; numbers arrive as text.
#[derive(Debug, Deserialize)]
pub struct NewItemForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub image: String,
}

impl TryFrom<NewItemForm> for InventoryDraft {
    type Error = String;

    fn try_from(form: NewItemForm) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(form.price.trim())
            .map_err(|e| format!("invalid price {:?}: {e}", form.price))?;
        let stock = form
            .stock
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid stock {:?}: {e}", form.stock))?;

        Ok(InventoryDraft {
            name: form.name,
            price,
            stock,
            category: form.category,
            image: form.image,
        })
    }
}

pub fn admin_router<S>() -> Router<S>
where
    S: InventoryHandlerState,
{
    Router::new()
        .route("/admin", get(admin_page::<S>))
        .route("/admin/items", post(create_item::<S>))
        .route("/admin/items/:id/delete", post(delete_item::<S>))
}

pub async fn admin_page<S>(State(state): State<S>, Query(query): Query<AdminQuery>) -> Response
where
    S: InventoryHandlerState,
{
    let (items, banner) = match state.inventory_service().list_all().await {
        Ok(rows) => (
            rows.into_iter().map(InventoryItem::from).collect::<Vec<_>>(),
            query.error(),
        ),
        Err(e) => {
            error!(error = %e, "Failed to load inventory for admin page");
            (Vec::new(), Some(AdminError::Load))
        }
    };

    Html(render_admin(&items, banner).into_string()).into_response()
}

pub async fn create_item<S>(State(state): State<S>, Form(form): Form<NewItemForm>) -> Redirect
where
    S: InventoryHandlerState,
{
    let draft = match InventoryDraft::try_from(form) {
        Ok(draft) => draft,
        Err(reason) => {
            warn!(%reason, "Rejected admin item form");
            return AdminError::Add.redirect();
        }
    };

    if state.strict_mode() {
        if let Err(e) = validate_input(&draft) {
            warn!(error = %e, "Admin item failed validation");
            return AdminError::Add.redirect();
        }
    }

    match state.inventory_service().insert(draft).await {
        Ok(_) => Redirect::to("/admin"),
        Err(e) => {
            error!(error = %e, "Failed to add item from admin page");
            AdminError::Add.redirect()
        }
    }
}

pub async fn delete_item<S>(State(state): State<S>, Path(id): Path<i32>) -> Redirect
where
    S: InventoryHandlerState,
{
    match state.inventory_service().delete_by_id(id).await {
        Ok(0) if state.strict_mode() => AdminError::Delete.redirect(),
        Ok(_) => Redirect::to("/admin"),
        Err(e) => {
            error!(id, error = %e, "Failed to delete item from admin page");
            AdminError::Delete.redirect()
        }
    }
}

pub fn render_admin(items: &[InventoryItem], banner: Option<AdminError>) -> Markup {
    page(
        "FashionNova Admin",
        None,
        html! {
            div.container {
                h1 { "Admin Panel" }
                @if let Some(err) = banner {
                    div.banner role="alert" { (err.message()) }
                }

                form method="post" action="/admin/items" {
                    h2 { "Add New Item" }
                    input type="text" name="name" placeholder="Item Name" required;
                    input type="number" name="price" placeholder="Price" step="0.01" min="0" value="0" required;
                    input type="number" name="stock" placeholder="Stock" step="1" min="0" value="0" required;
                    input type="text" name="category" placeholder="Category" required;
                    input type="text" name="image" placeholder="Image URL" required;
                    button type="submit" { "Add Item" }
                }

                div.inventory {
                    h2 { "Inventory" }
                    table {
                        thead {
                            tr {
                                th { "Name" }
                                th { "Price" }
                                th { "Stock" }
                                th { "Category" }
                                th { "Image" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            @for item in items {
                                tr {
                                    td { (item.name) }
                                    td { (format!("${:.2}", item.price)) }
                                    td { (item.stock) }
                                    td { (item.category) }
                                    td { img src=(item.image) alt=(item.name) width="64" height="64"; }
                                    td {
                                        form method="post" action=(format!("/admin/items/{}/delete", item.id)) {
                                            button type="submit" { "Delete" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
