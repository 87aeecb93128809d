use crate::domain::Points;

#[derive(Debug, Clone)]
pub struct SchedulingSettings {
    pub round_robin_min_teams: usize,
    pub all_pairs_min_teams: usize,
    pub all_pairs_max_teams: usize,
    pub access_code_digits: u32,
    pub access_code_max_attempts: usize,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            round_robin_min_teams: 5, // home, away, referee, two stands
            all_pairs_min_teams: 2,
            all_pairs_max_teams: 4,
            access_code_digits: 6,
            access_code_max_attempts: 50,
        }
    }
}

/// 3-2-1 match rewards plus the fair-play reward tiers
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub win_points: Points,
    pub draw_points: Points,
    pub loss_points: Points,
    pub max_rating: u8,
    pub referee_threshold: f64,
    pub referee_points: Points,
    pub stand_top_threshold: f64,
    pub stand_top_points: Points,
    pub stand_mid_threshold: f64,
    pub stand_mid_points: Points,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            win_points: Points::whole(3),
            draw_points: Points::whole(2),
            loss_points: Points::whole(1),
            max_rating: 10,
            referee_threshold: 5.0,
            referee_points: Points::whole(2),
            stand_top_threshold: 3.0,
            stand_top_points: Points::whole(1),
            stand_mid_threshold: 2.0,
            stand_mid_points: Points::HALF,
        }
    }
}

/// Averages a team must reach over its finalized matches to earn a badge
#[derive(Debug, Clone)]
pub struct BadgeSettings {
    pub fair_play_gold_average: f64,
    pub best_fans_average: f64,
    pub master_referee_average: f64,
    pub sportsmanship_floor: f64,
    pub sportsmanship_min_matches: usize,
}

impl Default for BadgeSettings {
    fn default() -> Self {
        Self {
            fair_play_gold_average: 4.5,
            best_fans_average: 3.5,
            master_referee_average: 8.0,
            sportsmanship_floor: 3.0,
            sportsmanship_min_matches: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scheduling: SchedulingSettings,
    pub scoring: ScoringSettings,
    pub badges: BadgeSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scheduling: SchedulingSettings::default(),
            scoring: ScoringSettings::default(),
            badges: BadgeSettings::default(),
        }
    }
}

pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "league_engine.db".to_string())
}
