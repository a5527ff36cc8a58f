//! Example wiring a router with hooks and a transient popup
//!
//! Registers two views, guards one of them with a before-hook and shows
//! that a popup opened by one view is gone once the next view renders.

use nivoxar_core::{MemoryHistory, Router, RouterSettings};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    nivoxar_core::init_tracing(true);

    let popup_open = Arc::new(AtomicBool::new(false));
    let history = Arc::new(MemoryHistory::default());

    let popup = popup_open.clone();
    let router = Router::builder(RouterSettings::instant())
        .history(history.clone())
        .route_fn("/dashboard", |_cx| async {
            println!("rendering dashboard");
            Ok(())
        })
        .route_fn("/calendar", move |cx| {
            let popup = popup.clone();
            async move {
                println!("rendering calendar, opening day popup");
                popup.store(true, Ordering::SeqCst);
                let closer = popup.clone();
                cx.transients()
                    .track("day-popup", move || closer.store(false, Ordering::SeqCst));
                Ok(())
            }
        })
        .build();

    let _logger = router.after_navigate(|path| async move {
        println!("after-hook: now on {}", path);
    });
    let guard = router.before_navigate(|path| async move { path.route_key() != "/admin" });

    router.init().await?;
    router.navigate("/calendar", false).await?;
    println!("popup open: {}", popup_open.load(Ordering::SeqCst));

    router.navigate("/dashboard", false).await?;
    println!("popup open: {}", popup_open.load(Ordering::SeqCst));

    let outcome = router.navigate("/admin", false).await?;
    println!("/admin: {:?}", outcome);

    guard.unsubscribe();
    let outcome = router.navigate("/admin", false).await?;
    println!("/admin without guard: {:?}", outcome);

    println!("history: {:?}", history.entries());
    Ok(())
}
