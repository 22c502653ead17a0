//! Warlatro CLI - headless match runner
//!
//! Plays one match against the default admiral with every stage delay
//! removed, printing each round. Useful for checking rules changes on desktop
//! without the Android shell. An optional first argument seeds the draws.

use warlatro::config::Settings;
use warlatro::game::navigation::Screen;
use warlatro::game::state::MatchEvent;
use warlatro::Warlatro;

fn main() {
    env_logger::init();

    let seed = std::env::args().nth(1).and_then(|arg| arg.parse::<u64>().ok());
    let settings = Settings {
        seed,
        ..Settings::instant()
    };

    println!("WARLATRO - Naval Card Warfare");
    println!("=============================");
    println!();

    let mut session = Warlatro::new(settings);
    session.navigate(Screen::Map);
    session.navigate(Screen::Battle);

    let opponent = *session.selected_opponent();
    println!(
        "Engaging {} ({}) {}",
        opponent.name,
        opponent.fleet,
        opponent.difficulty_stars()
    );
    println!("Rule: {}", opponent.special_rule);
    println!("Credits: {}", session.balance());
    println!();

    while session.start_round().is_some() {
        for event in session.flush() {
            match event {
                MatchEvent::Revealed {
                    round,
                    outcome,
                    player_wins,
                    opponent_wins,
                } => {
                    if let Some(state) = session.battle().map(|b| b.state()) {
                        let describe = |item: Option<warlatro::game::RankedItem>| {
                            item.map(|i| format!("{} {}", i.kind.glyph(), i))
                                .unwrap_or_default()
                        };
                        let player = describe(state.player_item);
                        let enemy = describe(state.opponent_item);
                        println!(
                            "Engagement {:>2}: {:<14} vs {:<14} {}  [{}-{}]",
                            round,
                            player,
                            enemy,
                            outcome.banner(),
                            player_wins,
                            opponent_wins
                        );
                    }
                }
                MatchEvent::Concluded {
                    outcome,
                    credits_delta,
                    balance,
                } => {
                    println!();
                    println!("{}", outcome.headline());
                    println!("{:+} CREDITS (balance {})", credits_delta, balance);
                }
                _ => {}
            }
        }
    }
}
