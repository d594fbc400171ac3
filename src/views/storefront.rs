use crate::handlers::inventory::{InventoryHandlerState, InventoryItem};
use crate::views::layout::page;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{html, Markup};
use tracing::error;

pub const LOAD_ERROR: &str = "Failed to load clothing items. Please try again later.";

const SCROLL_SCRIPT: &str = "function scrollStrip(delta){var c=document.getElementById('clothing-container');if(c){c.scrollLeft+=delta;}}";

const CATEGORIES: [&str; 4] = ["Dresses", "Tops", "Bottoms", "Accessories"];

const FOOTER_COLUMNS: [(&str, &[&str]); 3] = [
    ("Shop", &["New Arrivals", "Best Sellers", "Sale", "Collections"]),
    ("Help", &["FAQ", "Shipping & Returns", "Contact Us", "Size Guide"]),
    ("About", &["Our Story", "Sustainability", "Careers", "Press"]),
];

/// `GET /`, also the entry document for unmatched client-side routes.
pub async fn storefront<S>(State(state): State<S>) -> Response
where
    S: InventoryHandlerState,
{
    match state.inventory_service().list_all().await {
        Ok(rows) => {
            let items: Vec<InventoryItem> = rows.into_iter().map(InventoryItem::from).collect();
            Html(render_storefront(&items).into_string()).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to load storefront items");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_load_error().into_string()),
            )
                .into_response()
        }
    }
}

pub fn render_load_error() -> Markup {
    page("FashionNova", None, html! { div.error { (LOAD_ERROR) } })
}

pub fn render_storefront(items: &[InventoryItem]) -> Markup {
    page(
        "FashionNova",
        Some(SCROLL_SCRIPT),
        html! {
            main.container {
                section.hero {
                    @if let Some(featured) = items.first() {
                        img src=(featured.image) alt=(featured.name);
                        div.hero-copy {
                            h2 { "Summer Sensation" }
                            p { "Discover our hottest picks for the season. Be bold, be you." }
                            button.btn type="button" { "Shop Now" }
                        }
                    }
                }

                section.trending {
                    h2 { "Trending Now" }
                    div.strip {
                        button.scroll-left type="button" onclick="scrollStrip(-200)" aria-label="Scroll left" { "\u{2039}" }
                        button.scroll-right type="button" onclick="scrollStrip(200)" aria-label="Scroll right" { "\u{203A}" }
                        div #clothing-container style="display:flex;overflow-x:auto;gap:1.5rem" {
                            @for item in items {
                                (product_card(item))
                            }
                        }
                    }
                }

                section.promos {
                    div.promo {
                        h3 { "New Arrivals" }
                        p { "Be the first to wear our latest styles. Fresh looks for every occasion." }
                        button.btn type="button" { "Explore New" }
                    }
                    div.promo {
                        h3 { "Summer Sale" }
                        p { "Hot deals on cool styles. Up to 50% off on selected items." }
                        button.btn type="button" { "Shop Sale" }
                    }
                }

                section.categories {
                    h2 { "Shop by Category" }
                    @for category in CATEGORIES {
                        div.category-tile {
                            img src=(format!("https://source.unsplash.com/400x300/?{},fashion", category.to_lowercase())) alt=(category);
                            h3 { (category) }
                        }
                    }
                }

                section.newsletter {
                    h2 { "Join Our Style Community" }
                    p { "Get exclusive offers, style tips, and first access to new collections!" }
                    input type="email" placeholder="Enter your email";
                    button.btn type="button" { "Subscribe" }
                }
            }

            footer.site-footer {
                div.container {
                    @for (heading, links) in FOOTER_COLUMNS {
                        div {
                            h3 { (heading) }
                            ul {
                                @for link in links {
                                    li { (link) }
                                }
                            }
                        }
                    }
                    div {
                        h3 { "Follow Us" }
                    }
                    p.copyright { "\u{00A9} 2024 FashionNova. All rights reserved." }
                }
            }
        },
    )
}

fn product_card(item: &InventoryItem) -> Markup {
    html! {
        div.card {
            img src=(item.image) alt=(item.name);
            h3 { (item.name) }
            p.category { (item.category) }
            div.card-footer {
                span.price { (format!("${:.2}", item.price)) }
                span.rating { "\u{2605}" span { "4.5" } }
            }
        }
    }
}
