mod tax_tier;
mod work_schedule;

pub use tax_tier::{ScheduleError, TaxSchedule, TaxTier};
pub use work_schedule::{
    DEFAULT_WEEKS_PER_YEAR, NET_WEEKS_PER_YEAR, WorkSchedule, WorkScheduleError,
};
