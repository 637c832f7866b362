//! TypeScript bindings for markup and UI code.
//!
//! Payload and backend shapes are exported through `ts-rs`, one file per
//! type plus an `index.ts`. The custom swipe events additionally need an
//! ambient declaration so `on:swipeEnd` and friends type-check in markup.

use crate::swipe::SwipeEvent;
use crate::types::{
    Chapter, ChapterImages, CoordDiff, Coords, Format, Manga, SearchItem, SwipeEnd, SwipeMove,
};
use std::fs;
use std::path::Path;
use ts_rs::TS;

pub const SWIPE_DECLARATIONS_FILE: &str = "swipe-events.d.ts";

const EXPORTED_TYPES: &[&str] = &[
    "Coords",
    "CoordDiff",
    "SwipeMove",
    "SwipeEnd",
    "SearchItem",
    "Chapter",
    "Manga",
    "Format",
    "ChapterImages",
];

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

/// `detail` type of each swipe event as seen from markup.
fn event_detail_type(name: &str) -> &'static str {
    match name {
        SwipeEvent::START => "Coords",
        SwipeEvent::MOVE => "Coords & CoordDiff",
        SwipeEvent::END => "SwipeEnd",
        _ => "undefined",
    }
}

/// Ambient declarations for the custom events dispatched by the swipe action.
pub fn swipe_event_declarations() -> String {
    let mut out = String::from(
        "import type { Coords } from \"./Coords\";\n\
         import type { CoordDiff } from \"./CoordDiff\";\n\
         import type { SwipeEnd } from \"./SwipeEnd\";\n\n\
         declare global {\n    namespace svelteHTML {\n        interface HTMLAttributes<T> {\n",
    );
    for name in SwipeEvent::NAMES {
        out.push_str(&format!(
            "            \"on:{name}\"?: (event: CustomEvent<{}>) => void;\n",
            event_detail_type(name)
        ));
    }
    out.push_str("        }\n    }\n}\n\nexport {};\n");
    out
}

fn index_content() -> String {
    EXPORTED_TYPES
        .iter()
        .map(|name| format!("export type {{ {name} }} from \"./{name}\";\n"))
        .collect()
}

pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    for entry in fs::read_dir(out_dir)
        .map_err(|err| format!("Failed to list {}: {err}", out_dir.display()))?
    {
        let entry = entry.map_err(|err| format!("Failed to read entry: {err}"))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .map_err(|err| format!("Failed to remove {}: {err}", path.display()))?;
        }
    }

    export_single_type::<Coords>(out_dir)?;
    export_single_type::<CoordDiff>(out_dir)?;
    export_single_type::<SwipeMove>(out_dir)?;
    export_single_type::<SwipeEnd>(out_dir)?;
    export_single_type::<SearchItem>(out_dir)?;
    export_single_type::<Chapter>(out_dir)?;
    export_single_type::<Manga>(out_dir)?;
    export_single_type::<Format>(out_dir)?;
    export_single_type::<ChapterImages>(out_dir)?;

    let index_path = out_dir.join("index.ts");
    fs::write(&index_path, index_content())
        .map_err(|err| format!("Failed to write {}: {err}", index_path.display()))?;

    let declarations_path = out_dir.join(SWIPE_DECLARATIONS_FILE);
    fs::write(&declarations_path, swipe_event_declarations())
        .map_err(|err| format!("Failed to write {}: {err}", declarations_path.display()))?;

    Ok(())
}
