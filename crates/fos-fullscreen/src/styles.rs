//! Stylesheet backing the control and the pseudo-fullscreen fallback

use fos_dom::Document;

/// Id of the injected `<style>` element
pub const STYLESHEET_ID: &str = "leaflet-fullscreen-styles";

const STYLESHEET: &str = "
.pseudo-fullscreen {
    background-color: #ffffff;
    top: 0;
    left: 0;
    position: fixed !important;
    width: 100% !important;
    height: 100% !important;
    z-index: 9999 !important;
}

.leaflet-control-fullscreen {
    background-color: #ffffff;
    background-size: 24px 24px;
    background-repeat: no-repeat;
    background-position: center;
    width: 30px;
    height: 30px;
    cursor: pointer;
    z-index: 9999 !important;
}

.leaflet-control-fullscreen-notification {
    position: absolute;
    top: 10px;
    left: 50%;
    transform: translateX(-50%);
    padding: 6px 12px;
    background-color: rgba(0, 0, 0, 0.7);
    color: #ffffff;
    border-radius: 4px;
    z-index: 10000;
}
";

/// Add the stylesheet to `<head>` unless a previous attach already did.
/// Returns true if it was inserted.
pub fn install(doc: &mut Document) -> bool {
    if doc.get_element_by_id(STYLESHEET_ID).is_some() {
        return false;
    }
    let style = doc.tree.create_element("style");
    if let Some(el) = doc.tree.element_mut(style) {
        el.set_attr("id", STYLESHEET_ID);
    }
    let text = doc.tree.create_text(STYLESHEET);
    doc.tree.append_child(style, text);
    let head = doc.head();
    doc.tree.append_child(head, style);
    true
}
