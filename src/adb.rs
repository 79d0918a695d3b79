use std::path::{Path, PathBuf};

use tap::Pipe;
use tracing::{debug, info};

use crate::defs::adb_binary_name;
use crate::process::{Capture, Invocation, RunError, Runner};

/// The adb executable resolved from the configured platform-tools directory.
#[derive(Debug, Clone)]
pub struct Adb {
    binary: PathBuf,
}

impl Adb {
    pub fn new(platform_tools: &Path) -> Self {
        Self {
            binary: platform_tools.join(adb_binary_name()),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.binary).args(args)
    }

    pub fn devices(&self) -> Invocation {
        self.invocation(["devices"])
    }

    pub fn battery(&self, device: &str) -> Invocation {
        self.invocation(["-s", device, "shell", "dumpsys", "battery"])
    }
}

#[derive(Debug)]
pub struct DeviceReport {
    pub id: String,
    pub battery: Result<Vec<String>, RunError>,
}

#[derive(Debug)]
pub enum DeviceListing {
    NoDevices,
    Devices(Vec<DeviceReport>),
}

/// Serials from `adb devices` output, in the order adb printed them.
pub fn parse_devices(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("List of devices attached")
                && !line.starts_with('*')
        })
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Lists devices and queries battery state for each one.
///
/// A listing with no devices is reported as [`DeviceListing::NoDevices`]
/// without any further adb calls.
pub fn list_devices<R: Runner>(adb: &Adb, runner: &R) -> Result<DeviceListing, RunError> {
    let execution = runner.run(&adb.devices(), Capture::Collect)?;
    let devices = parse_devices(execution.stdout.as_deref().unwrap_or_default());

    if devices.is_empty() {
        info!("no devices connected");
        return Ok(DeviceListing::NoDevices);
    }

    info!("found {} device(s)", devices.len());
    devices
        .into_iter()
        .map(|id| {
            debug!(device = %id, "querying battery");
            let battery = runner
                .run(&adb.battery(&id), Capture::Collect)
                .map(|execution| battery_lines(&execution.stdout.unwrap_or_default()));
            DeviceReport { id, battery }
        })
        .collect::<Vec<_>>()
        .pipe(DeviceListing::Devices)
        .pipe(Ok)
}

fn battery_lines(output: &str) -> Vec<String> {
    output
        .trim()
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::{FakeRunner, failed};

    const TWO_DEVICES: &str =
        "List of devices attached\nemulator-5554\tdevice\nR58M12ABC\tunauthorized\n\n";

    fn adb() -> Adb {
        Adb::new(Path::new("platform-tools"))
    }

    #[test]
    fn binary_joins_platform_tools() {
        let adb = adb();
        assert_eq!(
            adb.binary(),
            Path::new("platform-tools").join(adb_binary_name())
        );
        assert_eq!(adb.devices().program(), adb.binary());
    }

    #[test]
    fn parse_skips_header_and_daemon_notices() {
        let output = "* daemon not running; starting now at tcp:5037\n\
                      * daemon started successfully\n\
                      List of devices attached\n\
                      192.168.1.20:5555\tdevice product:x model:Pixel_7\n";

        assert_eq!(parse_devices(output), vec!["192.168.1.20:5555"]);
    }

    #[test]
    fn zero_devices_skips_battery_queries() {
        let runner = FakeRunner::new(|_| Ok("List of devices attached\n\n".to_string()));

        let listing = list_devices(&adb(), &runner).unwrap();

        assert!(matches!(listing, DeviceListing::NoDevices));
        assert_eq!(runner.calls(), vec![vec!["devices".to_string()]]);
    }

    #[test]
    fn one_battery_query_per_device_in_listing_order() {
        let runner = FakeRunner::new(|args| match args {
            [cmd] if cmd == "devices" => Ok(TWO_DEVICES.to_string()),
            [_, id, ..] => Ok(format!("Current Battery Service state:\n  level: {}\n", id.len())),
            _ => Ok(String::new()),
        });

        let listing = list_devices(&adb(), &runner).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[1],
            ["-s", "emulator-5554", "shell", "dumpsys", "battery"]
        );
        assert_eq!(calls[2], ["-s", "R58M12ABC", "shell", "dumpsys", "battery"]);
        assert!(runner.captures().iter().all(|c| *c == Capture::Collect));

        let DeviceListing::Devices(devices) = listing else {
            panic!("expected devices");
        };
        let ids: Vec<_> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["emulator-5554", "R58M12ABC"]);
        assert_eq!(
            devices[0].battery.as_ref().unwrap(),
            &vec![
                "Current Battery Service state:".to_string(),
                "  level: 13".to_string()
            ]
        );
    }

    #[test]
    fn battery_failure_stays_with_its_device() {
        let runner = FakeRunner::new(|args| match args {
            [cmd] if cmd == "devices" => Ok(TWO_DEVICES.to_string()),
            [_, id, ..] if id == "R58M12ABC" => Err(failed("error: device unauthorized.")),
            _ => Ok("level: 90".to_string()),
        });

        let DeviceListing::Devices(devices) = list_devices(&adb(), &runner).unwrap() else {
            panic!("expected devices");
        };

        assert!(devices[0].battery.is_ok());
        assert_eq!(
            devices[1].battery.as_ref().unwrap_err().diagnostics(),
            "error: device unauthorized."
        );
    }

    #[test]
    fn listing_failure_propagates() {
        let runner = FakeRunner::new(|_| {
            Err(RunError::ToolMissing {
                program: PathBuf::from("platform-tools/adb"),
            })
        });

        let err = list_devices(&adb(), &runner).unwrap_err();

        assert!(matches!(err, RunError::ToolMissing { .. }));
        assert_eq!(runner.calls().len(), 1);
    }
}
