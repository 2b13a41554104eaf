// Browser-only tests (run with `wasm-pack test --headless --chrome`).
#![cfg(target_arch = "wasm32")]

use princess_runner::character::{self, Character};
use princess_runner::storage::{HIGH_SCORE_KEY, LocalScoreStore, ScoreStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn local_storage() -> web_sys::Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

#[wasm_bindgen_test]
fn local_store_round_trips_best() {
    local_storage().remove_item(HIGH_SCORE_KEY).unwrap();
    let mut store = LocalScoreStore::open().expect("localStorage");
    assert_eq!(store.load_best(), 0);
    store.save_best(41).unwrap();
    assert_eq!(store.load_best(), 41);
    assert_eq!(local_storage().get_item(HIGH_SCORE_KEY).unwrap().as_deref(), Some("41"));
}

#[wasm_bindgen_test]
fn corrupt_stored_best_reads_as_zero() {
    local_storage().set_item(HIGH_SCORE_KEY, "not a number").unwrap();
    let store = LocalScoreStore::open().expect("localStorage");
    assert_eq!(store.load_best(), 0);
}

#[wasm_bindgen_test]
fn stored_character_is_used_without_query() {
    local_storage().set_item(character::STORAGE_KEY, "princess3").unwrap();
    assert_eq!(character::selected_from_page(), Character::Princess3);
    local_storage().remove_item(character::STORAGE_KEY).unwrap();
}

#[wasm_bindgen_test]
async fn missing_mount_leaves_game_inert() {
    let handle = princess_runner::web::init_game(Some("no-such-element".into()), None)
        .await
        .expect("init_game should not throw");
    assert!(handle.is_none());
}

#[wasm_bindgen_test]
fn start_hook_can_run_twice() {
    princess_runner::wasm_start();
    princess_runner::wasm_start();
    log::info!("console logger installed");
    assert!(log::max_level() >= log::LevelFilter::Info);
}
