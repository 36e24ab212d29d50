use std::path::Path;

use sysinfo::{Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy)]
pub struct ResourceThresholds {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

impl Default for ResourceThresholds {
    fn default() -> Self {
        Self {
            cpu_percent: 80.0,
            memory_percent: 85.0,
            disk_percent: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

impl ResourceSample {
    /// Blocks for about a second to measure CPU load.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL.max(std::time::Duration::from_secs(1)));
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_percent = percent(sys.used_memory(), sys.total_memory());

        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new("/"))
            .or_else(|| disks.list().first());
        let disk_percent = root
            .map(|d| percent(d.total_space().saturating_sub(d.available_space()), d.total_space()))
            .unwrap_or(0.0);

        Self {
            cpu_percent: sys.global_cpu_usage() as f64,
            memory_percent,
            disk_percent,
        }
    }

    /// Human-readable breach messages; empty when every reading is in range.
    pub fn breaches(&self, limits: &ResourceThresholds) -> Vec<String> {
        let mut out = Vec::new();
        if self.cpu_percent >= limits.cpu_percent {
            out.push(format!("High CPU usage: {:.1}%", self.cpu_percent));
        }
        if self.memory_percent >= limits.memory_percent {
            out.push(format!("High memory usage: {:.1}%", self.memory_percent));
        }
        if self.disk_percent >= limits.disk_percent {
            out.push(format!("High disk usage: {:.1}%", self.disk_percent));
        }
        out
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

/// Total size in bytes of every file under `dir`.
pub fn directory_size(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}
