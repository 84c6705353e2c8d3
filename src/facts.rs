/// Space facts shown above the gallery
use rand::seq::SliceRandom;

pub const SPACE_FACTS: &[&str] = &[
    "Did you know? A day on Venus is longer than its year!",
    "Did you know? Jupiter has 95 known moons, including four large ones discovered by Galileo!",
    "Did you know? Saturn's rings are made mostly of ice particles and rocky debris!",
    "Did you know? Mars has the largest volcano in the solar system - Olympus Mons!",
    "Did you know? The Sun contains 99.86% of the mass in our solar system!",
    "Did you know? Neutron stars are so dense that a teaspoon would weigh 6 billion tons!",
    "Did you know? The Milky Way galaxy contains over 100 billion stars!",
    "Did you know? Light from the Sun takes about 8 minutes and 20 seconds to reach Earth!",
    "Did you know? The International Space Station orbits Earth every 90 minutes!",
    "Did you know? One million Earths could fit inside the Sun!",
];

/// Pick one fact at random
pub fn random_fact() -> &'static str {
    SPACE_FACTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SPACE_FACTS[0])
}
