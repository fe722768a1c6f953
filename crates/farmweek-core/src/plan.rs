//! Weekly task-request builders.
//!
//! Assembles the week's [`TaskRequest`] list from free-text items plus
//! the recurring programs: irrigation cadence, fertilization, the
//! microbial (PF) application calendar, even-week pest control, and the
//! growth-phase humidity-management routine. The calendars here are
//! keyed by week of year for a Shine Muscat greenhouse in central Korea.

use serde::Serialize;

use crate::task::{TaskKind, TaskRequest};

/// Working weekdays: Monday, Tuesday, Thursday, Friday, Saturday.
const WORKDAYS: [u8; 5] = [1, 2, 4, 5, 6];

/// A growth-stage window with its humidity-management targets.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GrowthPhase {
    pub name: &'static str,
    /// Inclusive week-of-year range.
    pub weeks: (u32, u32),
    pub target_humidity: &'static str,
    pub vent_mode: &'static str,
    pub note: &'static str,
}

/// Growth phases from dormancy through post-harvest, by week of year.
pub const GROWTH_PHASES: [GrowthPhase; 8] = [
    GrowthPhase {
        name: "Dormant",
        weeks: (1, 4),
        target_humidity: "60-70%",
        vent_mode: "minimal ventilation",
        note: "guard against freeze damage",
    },
    GrowthPhase {
        name: "Bud break",
        weeks: (5, 8),
        target_humidity: "70-80%",
        vent_mode: "condensation control",
        note: "ventilate at dawn",
    },
    GrowthPhase {
        name: "Shoot growth",
        weeks: (9, 14),
        target_humidity: "60-70%",
        vent_mode: "active ventilation",
        note: "prevent leggy growth",
    },
    GrowthPhase {
        name: "Flowering",
        weeks: (15, 17),
        target_humidity: "50-60%",
        vent_mode: "mandatory ventilation",
        note: "flower drop risk",
    },
    GrowthPhase {
        name: "Berry growth",
        weeks: (18, 24),
        target_humidity: "60-70%",
        vent_mode: "cracking prevention",
        note: "avoid sharp humidity swings",
    },
    GrowthPhase {
        name: "Coloring",
        weeks: (25, 30),
        target_humidity: "50-60%",
        vent_mode: "sugar development",
        note: "keep humidity low",
    },
    GrowthPhase {
        name: "Harvest",
        weeks: (31, 36),
        target_humidity: "50-60%",
        vent_mode: "quality hold",
        note: "prevent condensation",
    },
    GrowthPhase {
        name: "Post-harvest",
        weeks: (37, 52),
        target_humidity: "60-70%",
        vent_mode: "minimal ventilation",
        note: "prepare for overwintering",
    },
];

/// The growth phase covering `week`, if any.
pub fn phase_for_week(week: u32) -> Option<&'static GrowthPhase> {
    GROWTH_PHASES
        .iter()
        .find(|p| week >= p.weeks.0 && week <= p.weeks.1)
}

/// One entry in the microbial inoculant calendar.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PfApplication {
    pub week: u32,
    pub timing: &'static str,
    pub product: &'static str,
    pub amount: &'static str,
    pub kit_amount: &'static str,
}

/// The season's microbial application calendar, keyed by week of year.
pub const PF_CALENDAR: [PfApplication; 13] = [
    PfApplication { week: 1, timing: "45 days before bud break", product: "PF-1", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 2, timing: "30 days before bud break", product: "PF-2", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 4, timing: "15 days before bud break", product: "PF-4", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 6, timing: "bud break", product: "PF-4", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 9, timing: "15 days before bloom", product: "PF-1", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 11, timing: "bloom", product: "PF-2", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 13, timing: "15 days after bloom", product: "PF-4", amount: "250g", kit_amount: "500g" },
    PfApplication { week: 15, timing: "30 days after bloom", product: "PF-1", amount: "500g", kit_amount: "1kg" },
    PfApplication { week: 17, timing: "45 days after bloom", product: "PF-4", amount: "250g", kit_amount: "500g" },
    PfApplication { week: 18, timing: "50 days after bloom", product: "PF-2", amount: "250g", kit_amount: "500g" },
    PfApplication { week: 20, timing: "65 days after bloom", product: "PF-4", amount: "250g", kit_amount: "500g" },
    PfApplication { week: 22, timing: "80 days after bloom", product: "PF-2", amount: "250g", kit_amount: "500g" },
    PfApplication { week: 24, timing: "95 days after bloom", product: "PF-4", amount: "250g", kit_amount: "500g" },
];

/// The microbial application scheduled for `week`, if any.
pub fn pf_for_week(week: u32) -> Option<&'static PfApplication> {
    PF_CALENDAR.iter().find(|p| p.week == week)
}

/// Irrigation days for a cadence of every `interval` working days.
fn irrigation_days(interval: u8) -> Vec<u8> {
    let step = interval.max(1) as usize;
    WORKDAYS
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0)
        .map(|(_, &d)| d)
        .collect()
}

/// Builder for one week's task-request list.
pub struct WeekInput {
    week: u32,
    requests: Vec<TaskRequest>,
}

impl WeekInput {
    pub fn new(week: u32) -> Self {
        Self {
            week,
            requests: Vec::new(),
        }
    }

    /// Add a free-text item, classified into the taxonomy.
    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.requests.push(TaskRequest::from_text(text));
        self
    }

    /// Irrigation every `interval` working days, 07:00 start. Watering
    /// itself runs under cover, so weather sensitivity is off.
    pub fn with_irrigation(mut self, interval: u8, amount: &str) -> Self {
        self.requests.push(
            TaskRequest::with_kind(format!("Irrigation ({amount})"), TaskKind::Irrigation)
                .weather_sensitive(false)
                .duration(1)
                .preferred_days(irrigation_days(interval))
                .preferred_start(7),
        );
        self
    }

    /// A fertilization entry, 08:00 start.
    pub fn with_fertilizer(mut self, kind: &str, amount: &str) -> Self {
        self.requests.push(
            TaskRequest::with_kind(format!("{kind} ({amount})"), TaskKind::General)
                .duration(1)
                .preferred_start(8)
                .detail(format!("Fertilizer: {kind}\nAmount: {amount}")),
        );
        self
    }

    /// Even-week pest-control spraying, Tuesday preference, 10:00.
    pub fn with_pest_control(mut self, product: &str) -> Self {
        if self.week % 2 == 0 {
            self.requests.push(
                TaskRequest::with_kind(format!("Pest control spray ({product})"), TaskKind::Spray)
                    .duration(2)
                    .preferred_days(vec![2])
                    .preferred_start(10)
                    .detail(format!(
                        "Product: {product}\nDilution: fungicide 1000-2000x, insecticide 1000-1500x"
                    )),
            );
        }
        self
    }

    /// Finish: append the calendar-driven requests for this week and
    /// return the list.
    pub fn build(mut self) -> Vec<TaskRequest> {
        if let Some(pf) = pf_for_week(self.week) {
            self.requests.push(
                TaskRequest::with_kind(
                    format!("Microbial application ({} {})", pf.product, pf.amount),
                    TaskKind::Microbial,
                )
                .duration(1)
                .preferred_days(vec![4])
                .preferred_start(14)
                .detail(format!(
                    "Timing: {}\n{}: {}\nPF-kit: {}\nDilute per 200L of water, soil drench or foliar",
                    pf.timing, pf.product, pf.amount, pf.kit_amount
                )),
            );
        }

        if let Some(phase) = phase_for_week(self.week) {
            self.requests.push(
                TaskRequest::with_kind(
                    format!("Humidity management ({})", phase.target_humidity),
                    TaskKind::General,
                )
                .weather_sensitive(true)
                .duration(1)
                .preferred_days(WORKDAYS.to_vec())
                .preferred_start(9)
                .detail(format!(
                    "Growth phase: {}\nTarget humidity: {}\nVent mode: {}\nNote: {}",
                    phase.name, phase.target_humidity, phase.vent_mode, phase.note
                )),
            );
        }

        self.requests
    }
}
