//! Motivational lines the companion cycles through.

use rand::seq::SliceRandom;
use rand::Rng;

pub const QUOTES: &[&str] = &[
    "Tetotetoteto~",
    "I'm not a Vocaloid, I'm better!",
    "Drill power: 1000%",
    "Believe in the chimera!",
    "My birthday is April 1st, but I'm no joke!",
    "Itsudemo I love you kimi ni take kiss me!",
    "I want a baguette..",
    "Spin your worries away with me!",
    "Together we're unstoppable, unbreakable, unbeatable!",
    "Turn up the volume, let's break the silence!",
    "Teto is always here for you!",
    "Your feelings matter. Always listen to them!",
    "When life gets tough, twirl it out with me!",
    "Energy up! Heart full! Drill ready!",
    "Here's some Brain Implosion Juice!",
    "Teteteteteteto~",
    "You bring the light, I bring the drill!",
    "I've got the beat, you've got the moves!",
    "Believe in yourself because I do!",
    "Live loud, love loud, drill louder!",
    "Power up, charge up, drill on!",
    "It's okay to rest, even drills need a break!",
    "You are enough, just as you are!",
    "Teto's power is unstoppable and unbreakable!",
    "Let's make today extra drill-tastic!",
    "I'm your sparkly, cute chimera!",
    "I might be cute and quirky.. But don't underestimate my power!",
    "It's okay to rest! Even drills need a break!",
    "Small steps are still steps! Keep spinning!",
    "My energy is contagious.. Catch it!",
    "The world needs your unique sparkle!",
    "Every day's a festival with me around!",
    "Shout your dreams into the world!",
    "Power drills and positive vibes only!",
    "You are unstoppable, just like my drill!",
    "You are stronger than you realize!",
    "Even on hard days, your light breaks through!",
    "Drill-tastic days ahead! Let's do this!",
    "Every moment's a Teto moment!",
    "Keep your drill sharp and your smile sharper!",
    "Every step forward is a victory! Keep moving!",
    "Teto believes in you!",
    "Sing loud, drill proud!",
];

/// Picks quotes at random, avoiding an immediate repeat.
#[derive(Debug)]
pub struct QuoteRotator<R: Rng> {
    quotes: &'static [&'static str],
    last: Option<usize>,
    rng: R,
}

impl QuoteRotator<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(QUOTES, rand::thread_rng())
    }
}

impl Default for QuoteRotator<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuoteRotator<R> {
    pub fn with_rng(quotes: &'static [&'static str], rng: R) -> Self {
        QuoteRotator {
            quotes,
            last: None,
            rng,
        }
    }

    pub fn next_quote(&mut self) -> &'static str {
        let candidates: Vec<usize> = (0..self.quotes.len())
            .filter(|&i| self.quotes.len() == 1 || Some(i) != self.last)
            .collect();
        match candidates.choose(&mut self.rng) {
            Some(&index) => {
                self.last = Some(index);
                self.quotes[index]
            }
            None => "",
        }
    }
}
