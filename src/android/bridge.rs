//! JNI function exports for Android integration
//!
//! These functions are called from Kotlin via JNI to drive the Warlatro
//! session from the presentation shell.

use jni::objects::{JClass, JObject, JString};
use jni::sys::{jboolean, jint, jlong, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

use crate::config::Settings;
use crate::game::navigation::Screen;
use crate::game::shop::PurchaseCheck;
use crate::{get_warlatro, init_warlatro, Warlatro};

/// Initialize the session
///
/// Called once when the activity starts. A null or malformed config falls
/// back to the default settings.
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_init<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    config_json: JString<'local>,
) -> jboolean {
    // Initialize Android logger
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("Warlatro"),
    );

    log::info!("Initializing Warlatro session");

    let settings = if config_json.is_null() {
        Settings::default()
    } else {
        match env.get_string(&config_json) {
            Ok(config_str) => {
                let config: String = config_str.into();
                Settings::from_json(&config).unwrap_or_else(|e| {
                    log::error!("{}; using defaults", e);
                    Settings::default()
                })
            }
            Err(e) => {
                log::error!("Failed to get config string: {}", e);
                Settings::default()
            }
        }
    };

    if !init_warlatro(settings) {
        log::warn!("Warlatro session already initialized");
    }

    JNI_TRUE
}

/// Switch screens; returns false when the move is not allowed
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_navigate<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    screen_code: jint,
) -> jboolean {
    let Some(screen) = Screen::from_code(screen_code) else {
        log::error!("Unknown screen code {}", screen_code);
        return JNI_FALSE;
    };
    to_jboolean(with_session(|session| session.navigate(screen)).unwrap_or(false))
}

/// Select an opponent on the tactical map
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_selectOpponent<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    opponent_id: jint,
) -> jboolean {
    let Ok(id) = u32::try_from(opponent_id) else {
        return JNI_FALSE;
    };
    to_jboolean(with_session(|session| session.select_opponent(id)).unwrap_or(false))
}

/// Start a round; returns false when the match is not ready for one
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_startRound<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    to_jboolean(with_session(|session| session.start_round().is_some()).unwrap_or(false))
}

/// Tick the match clock; returns the number of stage events that fired
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_advance<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    elapsed_ms: jlong,
) -> jint {
    let elapsed = u64::try_from(elapsed_ms).unwrap_or(0);
    with_session(|session| session.advance(elapsed).len() as jint).unwrap_or(0)
}

/// Start the current match over
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_resetMatch<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    to_jboolean(with_session(|session| session.reset_match()).unwrap_or(false))
}

/// Buy a shop item; returns a `purchase_codes` value
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_purchase<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    item_id: JString<'local>,
) -> jint {
    let item: String = match env.get_string(&item_id) {
        Ok(s) => s.into(),
        Err(e) => {
            log::error!("Failed to get item id: {}", e);
            return PurchaseCheck::UnknownItem.code();
        }
    };
    with_session(|session| session.purchase(&item).code())
        .unwrap_or(PurchaseCheck::UnknownItem.code())
}

/// Current credit balance
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_getBalance<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jlong {
    with_session(|session| session.balance() as jlong).unwrap_or(0)
}

/// Get the session state as JSON
#[no_mangle]
pub extern "system" fn Java_io_warlatro_WarlatroCore_getState<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> JString<'local> {
    let state_json = with_session(|session| serde_json::to_string(&session.snapshot()))
        .and_then(|result| {
            result
                .map_err(|e| log::error!("Failed to serialize state: {}", e))
                .ok()
        })
        .unwrap_or_else(|| "{}".to_string());

    match env.new_string(state_json) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to create state string: {}", e);
            JObject::null().into()
        }
    }
}

/// Run a closure against the global session
fn with_session<T>(f: impl FnOnce(&mut Warlatro) -> T) -> Option<T> {
    let Some(session) = get_warlatro() else {
        log::error!("Warlatro not initialized");
        return None;
    };

    match session.lock() {
        Ok(mut session) => Some(f(&mut session)),
        Err(e) => {
            log::error!("Failed to lock Warlatro: {}", e);
            None
        }
    }
}

fn to_jboolean(value: bool) -> jboolean {
    if value {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// Screen codes (must match Kotlin side)
pub mod screen_codes {
    pub const MENU: i32 = 0;
    pub const MAP: i32 = 1;
    pub const BATTLE: i32 = 2;
    pub const SHOP: i32 = 3;
    pub const COLLECTION: i32 = 4;
}

/// Purchase result codes (must match Kotlin side)
pub mod purchase_codes {
    pub const OK: i32 = 0;
    pub const INSUFFICIENT_FUNDS: i32 = 1;
    pub const ALREADY_OWNED: i32 = 2;
    pub const UNKNOWN_ITEM: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_codes_match_enum() {
        assert_eq!(Screen::Menu.code(), screen_codes::MENU);
        assert_eq!(Screen::Map.code(), screen_codes::MAP);
        assert_eq!(Screen::Battle.code(), screen_codes::BATTLE);
        assert_eq!(Screen::Shop.code(), screen_codes::SHOP);
        assert_eq!(Screen::Collection.code(), screen_codes::COLLECTION);
    }

    #[test]
    fn test_purchase_codes_match_enum() {
        assert_eq!(PurchaseCheck::Ok.code(), purchase_codes::OK);
        assert_eq!(
            PurchaseCheck::InsufficientFunds.code(),
            purchase_codes::INSUFFICIENT_FUNDS
        );
        assert_eq!(PurchaseCheck::AlreadyOwned.code(), purchase_codes::ALREADY_OWNED);
        assert_eq!(PurchaseCheck::UnknownItem.code(), purchase_codes::UNKNOWN_ITEM);
    }

    #[test]
    fn test_jboolean_conversion() {
        assert_eq!(to_jboolean(true), JNI_TRUE);
        assert_eq!(to_jboolean(false), JNI_FALSE);
    }
}
