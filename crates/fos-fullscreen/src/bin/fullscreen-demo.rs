//! fOS Fullscreen - scripted demo session
//!
//! Usage: `fullscreen-demo [profile] [config.json]`
//! Profiles: standard, gecko, webkit, trident, webkit-transitional, unsupported

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use fos_dom::{FullscreenPolicy, UserAgentProfile};
use fos_fullscreen::{ControlConfiguration, MapPage};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let profile_name = args.next().unwrap_or_else(|| "standard".to_string());
    let profile = UserAgentProfile::by_name(&profile_name)
        .with_context(|| format!("Unknown user agent profile: {profile_name}"))?;

    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read configuration {path}"))?;
            ControlConfiguration::from_json(&json)?
        }
        None => ControlConfiguration::default(),
    };

    let transitions = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&transitions);
    let config = config.on_fullscreen_change(move |on| seen.borrow_mut().push(on));

    tracing::info!("fOS Fullscreen {} demo on the {} profile", fos_fullscreen::VERSION, profile_name);
    let mut page = MapPage::new(profile, config);
    page.attach()?;

    // Click, then let the notice run its course
    page.click_control();
    tracing::info!("After click: {:?}, title {:?}", page.mode(), page.control_title());
    page.advance(4000);

    // The user leaves with Esc (native) or the key toggles back (pseudo)
    if page.document.revoke_fullscreen() {
        page.pump();
    } else {
        page.press_key("F11");
    }
    tracing::info!("After exit: {:?}, title {:?}", page.mode(), page.control_title());
    page.advance(4000);

    // A rejected request leaves the control usable
    page.document.fullscreen_mut().set_policy(FullscreenPolicy::Deny);
    page.click_control();
    tracing::info!("After denied request: {:?}, notice {:?}", page.mode(), page.notification_text());

    page.detach();
    page.advance(4000);

    println!("Reported transitions: {:?}", transitions.borrow());
    println!("Layout invalidations: {}", page.map.invalidations());
    Ok(())
}
