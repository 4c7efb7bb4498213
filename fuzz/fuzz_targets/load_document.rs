#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfpick::session::MergeSession;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| Builder::new_multi_thread().enable_all().build().unwrap())
}

fuzz_target!(|data: &[u8]| {
    let mut session = MergeSession::default();

    // Arbitrary bytes must be rejected or merged, never panic
    runtime().block_on(async {
        if let Ok(id) = session.add_document("fuzz.pdf", data.to_vec()).await {
            let _ = session.set_page_text(&id, "1-3");
            let _ = session.merge().await;
        }
    });
});
