use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;background:#f3f4f6;color:#1f2937}
.container{max-width:1200px;margin:0 auto;padding:0 1rem}
.site-header{background:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);position:sticky;top:0;z-index:50}
.site-header .container{display:flex;align-items:center;justify-content:space-between;padding:1rem}
.brand{font-size:1.875rem;font-weight:800;text-decoration:none;background:linear-gradient(to right,#9333ea,#ec4899);-webkit-background-clip:text;color:transparent}
.search{flex:1;margin:0 2rem}
.search input{width:100%;padding:.5rem 1rem;border-radius:9999px;border:1px solid #d1d5db}
.site-nav a{margin-left:1.5rem;color:#4b5563;text-decoration:none}
.account{display:flex;align-items:center;gap:1rem}
.btn{border:0;border-radius:9999px;padding:.5rem 1rem;cursor:pointer}
.btn-primary{background:#9333ea;color:#fff}
.error{color:#dc2626;text-align:center;padding:2rem 0}
.banner{background:#fee2e2;border:1px solid #f87171;color:#b91c1c;padding:.75rem 1rem;border-radius:.25rem;margin-bottom:1rem}
"#;

/// Site header shown on every page. Search, bag and sign-in are decorative.
pub fn site_header() -> Markup {
    html! {
        header.site-header {
            div.container {
                a.brand href="/" { "FashionNova" }
                div.search {
                    input type="text" placeholder="Search for trendy styles...";
                }
                nav.site-nav {
                    a href="/" { "Home" }
                    a href="/categories" { "Categories" }
                    a href="/deals" { "Deals" }
                    a href="/admin" { "Admin" }
                }
                div.account {
                    span.bag aria-label="Shopping bag" { "\u{1F6CD}" }
                    button.btn.btn-primary type="button" { "Sign In" }
                }
            }
        }
    }
}

/// Full HTML document around `content`, with an optional inline script.
pub fn page(title: &str, script: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                (site_header())
                (content)
                @if let Some(js) = script {
                    script { (PreEscaped(js)) }
                }
            }
        }
    }
}
