use std::fmt;

use bitflags::bitflags;

/// Identifier for an alert record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a drone airframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DroneId(pub u32);

impl fmt::Display for DroneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DRONE-{:03}", self.0)
    }
}

/// Identifier for a soldier record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoldierId(pub u64);

impl fmt::Display for SoldierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared surface the generic store and the aggregator need from every
/// tracked record: a stable numeric key and the tick of the last qualifying
/// mutation.
pub trait Tracked: Send + Sync + 'static {
    fn id_key(&self) -> u64;
    fn timestamp(&self) -> u64;
}

/// Fixed alert category; never changes after creation.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Critical,
    Warning,
    Info,
}

impl AlertKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AlertKind::Critical),
            1 => Some(AlertKind::Warning),
            2 => Some(AlertKind::Info),
            _ => None,
        }
    }
}

impl From<AlertKind> for u8 {
    fn from(value: AlertKind) -> Self {
        value as u8
    }
}

/// Alert lifecycle state. `Resolved` is terminal.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn label(self) -> &'static str {
        match self {
            AlertStatus::Active => "Active",
            AlertStatus::Acknowledged => "Acknowledged",
            AlertStatus::Resolved => "Resolved",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AlertStatus::Active),
            1 => Some(AlertStatus::Acknowledged),
            2 => Some(AlertStatus::Resolved),
            _ => None,
        }
    }
}

impl From<AlertStatus> for u8 {
    fn from(value: AlertStatus) -> Self {
        value as u8
    }
}

/// Severity ranking, an axis independent of status. Ordered so that
/// escalation can saturate at [`Priority::Critical`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Priority::Low),
            1 => Some(Priority::Medium),
            2 => Some(Priority::High),
            3 => Some(Priority::Critical),
            _ => None,
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value as u8
    }
}

/// One surveillance alert raised by a detector or an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub status: AlertStatus,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub location: String,
    pub assigned_to: String,
    pub timestamp: u64,
}

impl Tracked for Alert {
    fn id_key(&self) -> u64 {
        self.id.0
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Drone flight state. `Maintenance` exits only through an explicit service.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DroneStatus {
    Active,
    Warning,
    Maintenance,
    Returning,
    Emergency,
}

impl DroneStatus {
    pub fn label(self) -> &'static str {
        match self {
            DroneStatus::Active => "Active",
            DroneStatus::Warning => "Warning",
            DroneStatus::Maintenance => "Maintenance",
            DroneStatus::Returning => "Returning",
            DroneStatus::Emergency => "Emergency",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DroneStatus::Active),
            1 => Some(DroneStatus::Warning),
            2 => Some(DroneStatus::Maintenance),
            3 => Some(DroneStatus::Returning),
            4 => Some(DroneStatus::Emergency),
            _ => None,
        }
    }
}

impl From<DroneStatus> for u8 {
    fn from(value: DroneStatus) -> Self {
        value as u8
    }
}

/// One airframe of the fixed patrol roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub id: DroneId,
    pub callsign: String,
    pub status: DroneStatus,
    /// Charge percentage in [0, 100]; only ever decreases outside of an
    /// explicit service reset.
    pub battery: u8,
    pub location: String,
    pub mission: String,
    pub altitude: u32,
    pub last_update: u64,
}

impl Tracked for Drone {
    fn id_key(&self) -> u64 {
        u64::from(self.id.0)
    }

    fn timestamp(&self) -> u64 {
        self.last_update
    }
}

/// Soldier readiness state.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoldierStatus {
    Active,
    Warning,
    Danger,
}

impl SoldierStatus {
    pub fn label(self) -> &'static str {
        match self {
            SoldierStatus::Active => "Active",
            SoldierStatus::Warning => "Warning",
            SoldierStatus::Danger => "Needs Attention",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SoldierStatus::Active),
            1 => Some(SoldierStatus::Warning),
            2 => Some(SoldierStatus::Danger),
            _ => None,
        }
    }
}

impl From<SoldierStatus> for u8 {
    fn from(value: SoldierStatus) -> Self {
        value as u8
    }
}

bitflags! {
    /// Kit carried by a soldier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Equipment: u16 {
        const RIFLE = 1 << 0;
        const PISTOL = 1 << 1;
        const RADIO = 1 << 2;
        const NIGHT_VISION = 1 << 3;
        const MEDICAL_KIT = 1 << 4;
        const BINOCULARS = 1 << 5;
        const GRENADES = 1 << 6;
        const FLASHLIGHT = 1 << 7;
        const TABLET = 1 << 8;
    }
}

/// One member of the fixed ground roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Soldier {
    pub id: SoldierId,
    pub name: String,
    pub rank: String,
    pub status: SoldierStatus,
    pub location: String,
    pub mission: String,
    pub equipment: Equipment,
    /// Both percentages stay in [0, 100]; health resets only through an
    /// explicit field treatment.
    pub health: u8,
    pub battery: u8,
    pub last_seen: u64,
}

impl Tracked for Soldier {
    fn id_key(&self) -> u64 {
        self.id.0
    }

    fn timestamp(&self) -> u64 {
        self.last_seen
    }
}
