//! HTML rendering of outline blocks.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Link titles arrive pre-escaped from [`crate::block`], everything else is
//! escaped here.
//!
//! ```html
//! <nav class="toc-outline" aria-label="Book navigation">
//!   <ul class="links">
//!     <li class="prev"><a href="/install" rel="prev"><span class="icon icon--previous"></span>Install</a></li>
//!     <li class="up"><a href="/guide" rel="up">Up</a></li>
//!     <li class="next"><a href="/faq" rel="next">FAQ<span class="icon icon--next"></span></a></li>
//!   </ul>
//! </nav>
//! ```

use crate::block::BlockBuild;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Renders the link list. An empty build renders to nothing.
pub fn render_links(build: &BlockBuild) -> Markup {
    html! {
        @if !build.is_empty() {
            nav.toc-outline aria-label="Book navigation" {
                ul.links {
                    @for link in &build.links {
                        li class=(link.rel.as_str()) {
                            a href=(link.url) rel=(link.rel.as_str()) {
                                (PreEscaped(&link.title_html))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders a standalone preview document around the links.
pub fn render_page(title: &str, build: &BlockBuild) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
            }
            body {
                main {
                    h1 { (title) }
                }
                (render_links(build))
            }
        }
    }
}
