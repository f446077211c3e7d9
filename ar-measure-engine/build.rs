// build.rs
use std::{env, fs, path::PathBuf};

use constants::session::{
    DEFAULT_BOX_SIZE_CM, DOM_OVERLAY_ROOT, OPTIONAL_FEATURES, REQUIRED_FEATURES, SETTINGS_PATH,
};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../constants/src/session.rs");

    let [width, height, depth] = DEFAULT_BOX_SIZE_CM;
    let settings = serde_json::json!({
        "required_features": REQUIRED_FEATURES,
        "optional_features": OPTIONAL_FEATURES,
        "dom_overlay_root": DOM_OVERLAY_ROOT,
        "default_dimensions_cm": {
            "width": width,
            "height": height,
            "depth": depth
        }
    });

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let assets_dir = manifest_dir.join("assets");
    fs::create_dir_all(&assets_dir).ok();

    let json_content = serde_json::to_string_pretty(&settings).unwrap();

    let settings_path = assets_dir.join(SETTINGS_PATH);
    let unchanged = fs::read_to_string(&settings_path)
        .map(|existing| existing == json_content)
        .unwrap_or(false);

    if !unchanged {
        fs::write(&settings_path, &json_content).expect("Failed to write default AR settings");
        println!("cargo:warning=Generated default settings in assets/{SETTINGS_PATH}");
    }
}
