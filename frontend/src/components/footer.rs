//! Footer component

use leptos::*;

use crate::{COLLECTION_ADDRESS, SERUM_ADDRESS};

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a
                    href=format!("https://goerli.etherscan.io/address/{}", COLLECTION_ADDRESS)
                    class="footer-link"
                    target="_blank"
                >
                    "Collection"
                </a>
                {SERUM_ADDRESS.map(|serum| view! {
                    <a
                        href=format!("https://goerli.etherscan.io/address/{}", serum)
                        class="footer-link"
                        target="_blank"
                    >
                        "Serum"
                    </a>
                })}
            </div>
        </footer>
    }
}
