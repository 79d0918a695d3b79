use crate::menu::{Action, Menu, Plan, Step};
use crate::process::RunError;

const SCREEN_DIR: &str = "/sdcard/";

pub fn menus() -> Vec<Menu> {
    vec![
        device_management(),
        app_management(),
        file_management(),
        system_management(),
        shell_execution(),
        screen_management(),
        network_management(),
        data_management(),
        development_testing(),
        root_access(),
        remote_control(),
        power_management(),
        permissions_security(),
        battery_management(),
        advanced_usage(),
    ]
}

fn device_management() -> Menu {
    Menu::new(
        "Device Management",
        vec![
            Action::list_devices("Lists all the connected Android devices and emulators."),
            Action::run(
                "Connects to a device over Wi-Fi.",
                "Connect to a device over Wi-Fi",
                Plan::new(&["Enter the device IP address"], |i| {
                    vec![
                        Step::terminal(["tcpip", "5555"]),
                        Step::terminal(["connect", &i[0]]),
                    ]
                })
                .done(|i| format!("Successfully connected to {}.", &i[0])),
            ),
            Action::run(
                "Disconnects from a device.",
                "Disconnect a device",
                Plan::new(&["Enter the device IP address to disconnect"], |i| {
                    vec![Step::terminal(["disconnect", &i[0]])]
                })
                .done(|i| format!("Successfully disconnected from {}.", &i[0])),
            ),
            Action::run(
                "Pairs a device with ADB over Wi-Fi (Android 11 and above).",
                "Pair a device with ADB over Wi-Fi (Android 11 and above)",
                Plan::new(&["Enter the device IP address"], |i| {
                    vec![Step::terminal(["pair", &i[0]])]
                })
                .done(|i| format!("Successfully paired with {}.", &i[0])),
            ),
        ],
    )
}

fn app_management() -> Menu {
    Menu::new(
        "App Management",
        vec![
            Action::run(
                "Install an APK file.",
                "Install APK",
                Plan::new(&["Enter the path to the APK file"], |i| {
                    vec![Step::terminal(["install", &i[0]])]
                })
                .done(|_| "APK installed successfully.".to_string()),
            ),
            Action::run(
                "Uninstall an app.",
                "Uninstall App",
                Plan::new(&["Enter the package name of the app to uninstall"], |i| {
                    vec![Step::terminal(["uninstall", &i[0]])]
                })
                .done(|_| "App uninstalled successfully.".to_string()),
            ),
            Action::run(
                "Install multiple APKs.",
                "Install Multiple APKs",
                Plan::new(
                    &["Enter the paths to the APK files separated by spaces"],
                    |i| vec![Step::terminal(["install-multiple"]).words(&i[0])],
                )
                .done(|_| "Multiple APKs installed successfully.".to_string()),
            ),
            Action::run(
                "Reinstall an app, keeping its data.",
                "Reinstall APK",
                Plan::new(&["Enter the path to the APK file"], |i| {
                    vec![Step::terminal(["install", "-r", &i[0]])]
                })
                .done(|_| "APK reinstalled successfully.".to_string()),
            ),
        ],
    )
}

fn file_management() -> Menu {
    Menu::new(
        "File Management",
        vec![
            Action::run(
                "Push a file to the device.",
                "Push File to Device",
                Plan::new(
                    &[
                        "Enter the local file path",
                        "Enter the remote path on the device",
                    ],
                    |i| vec![Step::terminal(["push", &i[0], &i[1]])],
                )
                .done(|_| "File pushed successfully.".to_string()),
            ),
            Action::run(
                "Pull a file from the device.",
                "Pull File from Device",
                Plan::new(
                    &[
                        "Enter the remote file path on the device",
                        "Enter the local path to save the file",
                    ],
                    |i| vec![Step::terminal(["pull", &i[0], &i[1]])],
                )
                .done(|_| "File pulled successfully.".to_string()),
            ),
            Action::run(
                "Delete a file on the device.",
                "Delete File on Device",
                Plan::new(&["Enter the remote file path on the device to delete"], |i| {
                    vec![Step::terminal(["shell", "rm", &i[0]])]
                })
                .done(|_| "File deleted successfully.".to_string()),
            ),
        ],
    )
}

fn system_management() -> Menu {
    Menu::new(
        "System Management",
        vec![
            Action::run(
                "Stream system logs.",
                "Streaming System Logs",
                Plan::new(&[], |_| vec![Step::terminal(["logcat"])]),
            ),
            Action::run(
                "Save logs to a file.",
                "Saving Logs to File",
                Plan::new(&[], |_| vec![Step::log_file(["logcat", "-d"])]),
            ),
            Action::run(
                "Generate a bug report.",
                "Generating Bug Report",
                Plan::new(&[], |_| vec![Step::terminal(["bugreport"])])
                    .done(|_| "Bug report generated.".to_string()),
            ),
            Action::run(
                "Dump system service information.",
                "Dumping System Service Information",
                Plan::new(&[], |_| vec![Step::terminal(["shell", "dumpsys"])]),
            ),
            Action::run(
                "Display real-time system processes.",
                "Displaying Real-Time System Processes",
                Plan::new(&[], |_| vec![Step::terminal(["shell", "top"])]),
            ),
        ],
    )
}

fn shell_execution() -> Menu {
    Menu::new(
        "Shell and Command Execution",
        vec![
            Action::run(
                "Start an interactive shell on the device.",
                "Starting Interactive Shell",
                Plan::new(&[], |_| vec![Step::terminal(["shell"])]),
            ),
            Action::run(
                "Run a specific command on the device's shell.",
                "Run a Specific Command",
                Plan::new(&["Enter the command to run"], |i| {
                    vec![Step::print(["shell"]).words(&i[0])]
                }),
            ),
            Action::run(
                "List all installed packages on the device.",
                "Listing Installed Packages",
                Plan::new(&[], |_| {
                    vec![Step::print(["shell", "pm", "list", "packages"])]
                }),
            ),
            Action::run(
                "Uninstall a package via shell.",
                "Uninstall a Package",
                Plan::new(&["Enter the package name to uninstall"], |i| {
                    vec![Step::terminal(["shell", "pm", "uninstall", &i[0]])]
                })
                .done(|i| format!("Package {} has been uninstalled.", &i[0])),
            ),
        ],
    )
}

/// Captures on the device under `/sdcard/` and pulls the result locally.
fn capture_and_pull(tool: &str, filename: &str) -> Vec<Step> {
    let remote = format!("{SCREEN_DIR}{filename}");
    vec![
        Step::terminal(["shell", tool, remote.as_str()]),
        Step::terminal(["pull", remote.as_str(), filename]),
    ]
}

fn screen_management() -> Menu {
    Menu::new(
        "Screen Management",
        vec![
            Action::run(
                "Take a screenshot of the device screen.",
                "Taking a Screenshot",
                Plan::new(&["Enter the filename to save the screenshot"], |i| {
                    capture_and_pull("screencap", &i[0])
                })
                .done(|i| format!("Screenshot saved as {}.", &i[0])),
            ),
            Action::run(
                "Record the screen to a video file.",
                "Recording the Screen",
                Plan::new(&["Enter the filename to save the video"], |i| {
                    capture_and_pull("screenrecord", &i[0])
                })
                .done(|i| format!("Screen recording saved as {}.", &i[0])),
            ),
            Action::choose(
                "Get or set the screen resolution.",
                "Get or Set Screen Resolution",
                "Enter 'get' to get the resolution or 'set' to set a new resolution",
                vec![
                    (
                        "get",
                        Plan::new(&[], |_| vec![Step::print(["shell", "wm", "size"])]),
                    ),
                    (
                        "set",
                        Plan::new(&["Enter the new resolution (e.g., 1080x1920)"], |i| {
                            vec![Step::terminal(["shell", "wm", "size", &i[0]])]
                        })
                        .done(|i| format!("Screen resolution set to {}.", &i[0])),
                    ),
                ],
            ),
            Action::choose(
                "Get or set the screen density.",
                "Get or Set Screen Density",
                "Enter 'get' to get the density or 'set' to set a new density",
                vec![
                    (
                        "get",
                        Plan::new(&[], |_| vec![Step::print(["shell", "wm", "density"])]),
                    ),
                    (
                        "set",
                        Plan::new(&["Enter the new density (e.g., 320)"], |i| {
                            vec![Step::terminal(["shell", "wm", "density", &i[0]])]
                        })
                        .done(|i| format!("Screen density set to {}.", &i[0])),
                    ),
                ],
            ),
        ],
    )
}

fn network_management() -> Menu {
    Menu::new(
        "Network Management",
        vec![
            Action::run(
                "Forward a local port to a remote port on the device.",
                "Forwarding Local Port to Remote Port",
                Plan::new(&["Enter the local port", "Enter the remote port"], |i| {
                    vec![Step::terminal([
                        "forward".to_string(),
                        format!("tcp:{}", &i[0]),
                        format!("tcp:{}", &i[1]),
                    ])]
                })
                .done(|i| {
                    format!(
                        "Local port {} forwarded to remote port {}.",
                        &i[0], &i[1]
                    )
                }),
            ),
            Action::run(
                "Forward a remote port to a local port.",
                "Forwarding Remote Port to Local Port",
                Plan::new(&["Enter the remote port", "Enter the local port"], |i| {
                    vec![Step::terminal([
                        "reverse".to_string(),
                        format!("tcp:{}", &i[0]),
                        format!("tcp:{}", &i[1]),
                    ])]
                })
                .done(|i| {
                    format!(
                        "Remote port {} forwarded to local port {}.",
                        &i[0], &i[1]
                    )
                }),
            ),
            Action::run(
                "Display network interface configurations.",
                "Displaying Network Interface Configurations",
                Plan::new(&[], |_| vec![Step::print(["shell", "netcfg"])]),
            ),
            Action::choose(
                "Enable or disable airplane mode.",
                "Toggle Airplane Mode",
                "Enter 'enable' to enable or 'disable' to disable airplane mode",
                vec![
                    (
                        "enable",
                        Plan::new(&[], |_| {
                            vec![Step::terminal([
                                "shell",
                                "settings",
                                "put",
                                "global",
                                "airplane_mode_on",
                                "1",
                            ])]
                        })
                        .done(|_| "Airplane mode enabled.".to_string()),
                    ),
                    (
                        "disable",
                        Plan::new(&[], |_| {
                            vec![Step::terminal([
                                "shell",
                                "settings",
                                "put",
                                "global",
                                "airplane_mode_on",
                                "0",
                            ])]
                        })
                        .done(|_| "Airplane mode disabled.".to_string()),
                    ),
                ],
            ),
            Action::choose(
                "Enable or disable Wi-Fi.",
                "Toggle Wi-Fi",
                "Enter 'enable' to enable or 'disable' to disable Wi-Fi",
                vec![
                    (
                        "enable",
                        Plan::new(&[], |_| {
                            vec![Step::terminal(["shell", "svc", "wifi", "enable"])]
                        })
                        .done(|_| "Wi-Fi enabled.".to_string()),
                    ),
                    (
                        "disable",
                        Plan::new(&[], |_| {
                            vec![Step::terminal(["shell", "svc", "wifi", "disable"])]
                        })
                        .done(|_| "Wi-Fi disabled.".to_string()),
                    ),
                ],
            ),
        ],
    )
}

fn data_management() -> Menu {
    Menu::new(
        "Data Management",
        vec![
            Action::run(
                "Create a full backup of the device.",
                "Creating a Full Backup",
                Plan::new(&["Enter the filename to save the backup"], |i| {
                    vec![Step::terminal([
                        "backup", "-f", &i[0], "-apk", "-shared", "-all",
                    ])]
                })
                .done(|i| format!("Backup saved as {}.", &i[0])),
            ),
            Action::run(
                "Restore a backup to the device.",
                "Restoring a Backup",
                Plan::new(&["Enter the filename of the backup to restore"], |i| {
                    vec![Step::terminal(["restore", &i[0]])]
                })
                .done(|i| format!("Backup {} restored.", &i[0])),
            ),
            Action::run(
                "Clear app data for a specified package.",
                "Clearing App Data",
                Plan::new(
                    &["Enter the package name of the app to clear data for"],
                    |i| vec![Step::terminal(["shell", "am", "clear", &i[0]])],
                )
                .done(|i| format!("App data for {} cleared.", &i[0])),
            ),
        ],
    )
}

fn development_testing() -> Menu {
    Menu::new(
        "Development and Testing",
        vec![
            Action::run(
                "Run a stress test using monkey.",
                "Running Monkey Stress Test",
                Plan::new(&[], |_| {
                    vec![Step::terminal(["shell", "monkey", "-v", "500"])]
                })
                .done(|_| "Monkey test completed.".to_string()),
            ),
            Action::run(
                "Start an activity.",
                "Starting Activity",
                Plan::new(
                    &["Enter the component name (e.g., com.example/.MainActivity)"],
                    |i| vec![Step::terminal(["shell", "am", "start", "-n", &i[0]])],
                )
                .done(|i| format!("Activity {} started.", &i[0])),
            ),
            Action::run(
                "Simulate user input.",
                "Simulating User Input",
                Plan::new(&["Enter the input command (e.g., tap, swipe, text)"], |i| {
                    vec![Step::terminal(["shell", "input", &i[0]])]
                })
                .done(|i| format!("Simulated input command: {}.", &i[0])),
            ),
            Action::run(
                "Manage device settings.",
                "Managing Device Settings",
                Plan::new(
                    &["Enter the settings command (e.g., put global <key> <value>)"],
                    |i| vec![Step::terminal(["shell", "settings"]).words(&i[0])],
                )
                .done(|i| format!("Executed settings command: {}.", &i[0])),
            ),
        ],
    )
}

fn root_access() -> Menu {
    Menu::new(
        "Root Access and File Permissions",
        vec![
            Action::run(
                "Restart adbd daemon with root privileges.",
                "Restarting adbd with root privileges",
                Plan::new(&[], |_| vec![Step::terminal(["root"])])
                    .done(|_| "adbd daemon restarted with root privileges.".to_string()),
            ),
            Action::run(
                "Restart adbd daemon without root privileges.",
                "Restarting adbd without root privileges",
                Plan::new(&[], |_| vec![Step::terminal(["unroot"])])
                    .done(|_| "adbd daemon restarted without root privileges.".to_string()),
            ),
            Action::run(
                "Remount the system partitions as writable.",
                "Remounting system partitions as writable",
                Plan::new(&[], |_| vec![Step::terminal(["remount"])])
                    .done(|_| "System partitions remounted as writable.".to_string()),
            ),
            Action::run(
                "Change file permissions.",
                "Changing File Permissions",
                Plan::new(
                    &[
                        "Enter the file path on the device",
                        "Enter the new permissions (e.g., 755)",
                    ],
                    |i| vec![Step::terminal(["shell", "chmod", &i[1], &i[0]])],
                )
                .done(|i| format!("Permissions for {} changed to {}.", &i[0], &i[1])),
            ),
        ],
    )
}

fn remote_control() -> Menu {
    Menu::new(
        "Remote Control",
        vec![
            Action::run(
                "Send a key event.",
                "Sending Key Event",
                Plan::new(&["Enter the keycode (e.g., 3 for Home, 4 for Back)"], |i| {
                    vec![Step::terminal(["shell", "input", "keyevent", &i[0]])]
                })
                .done(|i| format!("Key event {} sent.", &i[0])),
            ),
            Action::run(
                "Simulate a tap at specified coordinates.",
                "Simulating Tap",
                Plan::new(&["Enter the x-coordinate", "Enter the y-coordinate"], |i| {
                    vec![Step::terminal(["shell", "input", "tap", &i[0], &i[1]])]
                })
                .done(|i| format!("Tap simulated at coordinates ({}, {}).", &i[0], &i[1])),
            ),
            Action::run(
                "Simulate a swipe.",
                "Simulating Swipe",
                Plan::new(
                    &[
                        "Enter the start x-coordinate",
                        "Enter the start y-coordinate",
                        "Enter the end x-coordinate",
                        "Enter the end y-coordinate",
                        "Enter the swipe duration in milliseconds",
                    ],
                    |i| {
                        vec![Step::terminal([
                            "shell", "input", "swipe", &i[0], &i[1], &i[2], &i[3], &i[4],
                        ])]
                    },
                )
                .done(|i| {
                    format!(
                        "Swipe simulated from ({}, {}) to ({}, {}) over {} ms.",
                        &i[0], &i[1], &i[2], &i[3], &i[4]
                    )
                }),
            ),
        ],
    )
}

fn power_management() -> Menu {
    Menu::new(
        "Power Management",
        vec![
            Action::run(
                "Reboot the device.",
                "Rebooting Device",
                Plan::new(&[], |_| vec![Step::terminal(["reboot"])])
                    .done(|_| "Device is rebooting.".to_string()),
            ),
            Action::run(
                "Reboot the device into bootloader.",
                "Rebooting Device into Bootloader",
                Plan::new(&[], |_| vec![Step::terminal(["reboot", "bootloader"])])
                    .done(|_| "Device is rebooting into bootloader.".to_string()),
            ),
            Action::run(
                "Reboot the device into recovery mode.",
                "Rebooting Device into Recovery Mode",
                Plan::new(&[], |_| vec![Step::terminal(["reboot", "recovery"])])
                    .done(|_| "Device is rebooting into recovery mode.".to_string()),
            ),
            Action::run(
                "Power off the device.",
                "Powering Off Device",
                Plan::new(&[], |_| vec![Step::terminal(["shell", "reboot", "-p"])])
                    .done(|_| "Device is powering off.".to_string()),
            ),
        ],
    )
}

const POLICY_MANAGER_UNAVAILABLE: &str = "\
The 'device_policy_manager' command is not available on this device.
Possible reasons:
- The device may not support this command.
- The device may need to be rooted to access this feature.
- The command may require a different syntax or different device policies.";

fn policy_manager_hint(err: &RunError) -> Option<&'static str> {
    let diagnostics = err.diagnostics();
    (diagnostics.contains("not found") || diagnostics.contains("inaccessible"))
        .then_some(POLICY_MANAGER_UNAVAILABLE)
}

fn permissions_security() -> Menu {
    Menu::new(
        "Permissions and Security",
        vec![
            Action::run(
                "Grant a specific permission to an app.",
                "Granting Permission",
                Plan::new(
                    &[
                        "Enter the package name",
                        "Enter the permission (e.g., android.permission.CAMERA)",
                    ],
                    |i| vec![Step::terminal(["shell", "pm", "grant", &i[0], &i[1]])],
                )
                .done(|i| format!("Permission {} granted to {}.", &i[1], &i[0])),
            ),
            Action::run(
                "Revoke a specific permission from an app.",
                "Revoking Permission",
                Plan::new(
                    &[
                        "Enter the package name",
                        "Enter the permission (e.g., android.permission.CAMERA)",
                    ],
                    |i| vec![Step::terminal(["shell", "pm", "revoke", &i[0], &i[1]])],
                )
                .done(|i| format!("Permission {} revoked from {}.", &i[1], &i[0])),
            ),
            Action::run(
                "Manage device policies.",
                "Managing Device Policies",
                Plan::new(&[], |_| {
                    vec![Step::print(["shell", "device_policy_manager"])]
                })
                .hint(policy_manager_hint),
            ),
        ],
    )
}

fn battery_management() -> Menu {
    Menu::new(
        "Battery Management",
        vec![
            Action::run(
                "Dump the current battery status.",
                "Dumping Battery Status",
                Plan::new(&[], |_| {
                    vec![Step::print(["shell", "dumpsys", "battery"])]
                }),
            ),
            Action::run(
                "Set the battery level (useful for testing).",
                "Setting Battery Level",
                Plan::new(&["Enter the battery level (e.g., 50)"], |i| {
                    vec![Step::terminal([
                        "shell", "dumpsys", "battery", "set", "level", &i[0],
                    ])]
                })
                .done(|i| format!("Battery level set to {}.", &i[0])),
            ),
            Action::run(
                "Reset the battery status.",
                "Resetting Battery Status",
                Plan::new(&[], |_| {
                    vec![Step::terminal(["shell", "dumpsys", "battery", "reset"])]
                })
                .done(|_| "Battery status reset.".to_string()),
            ),
        ],
    )
}

fn advanced_usage() -> Menu {
    Menu::new(
        "Advanced Usage",
        vec![
            Action::run(
                "Wait for device connection.",
                "Waiting for Device Connection",
                Plan::new(&[], |_| vec![Step::terminal(["wait-for-device"])])
                    .done(|_| "Device is now connected.".to_string()),
            ),
            Action::run(
                "Enter superuser mode.",
                "Entering Superuser Mode",
                Plan::new(&[], |_| vec![Step::terminal(["shell", "su"])])
                    .done(|_| "Entered superuser mode.".to_string()),
            ),
            Action::run(
                "Get device properties.",
                "Getting Device Properties",
                Plan::new(&[], |_| vec![Step::print(["shell", "getprop"])]),
            ),
            Action::run(
                "Set device properties.",
                "Setting Device Properties",
                Plan::new(
                    &[
                        "Enter the property name (e.g., sys.debuggable)",
                        "Enter the property value",
                    ],
                    |i| vec![Step::terminal(["shell", "setprop", &i[0], &i[1]])],
                )
                .done(|i| format!("Property {} set to {}.", &i[0], &i[1])),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ActionKind, Inputs, Sink};
    use crate::process::fake::failed;

    fn plan<'a>(menus: &'a [Menu], menu: &str, label_prefix: &str) -> &'a Plan {
        let action = menus
            .iter()
            .find(|m| m.title == menu)
            .and_then(|m| m.actions.iter().find(|a| a.label.starts_with(label_prefix)))
            .unwrap_or_else(|| panic!("no action {label_prefix:?} in {menu:?}"));
        match &action.kind {
            ActionKind::Run(plan) => plan,
            _ => panic!("{label_prefix:?} is not a plain action"),
        }
    }

    fn args(plan: &Plan, answers: &[&str]) -> Vec<Vec<String>> {
        let inputs: Inputs = answers.iter().copied().collect();
        (plan.steps)(&inputs).into_iter().map(|s| s.args).collect()
    }

    #[test]
    fn fifteen_categories_each_with_actions() {
        let menus = menus();

        assert_eq!(menus.len(), 15);
        assert!(menus.iter().all(|m| !m.actions.is_empty()));
        assert_eq!(menus.iter().map(|m| m.actions.len()).sum::<usize>(), 57);
    }

    #[test]
    fn every_plan_builds_steps_from_its_fields() {
        for menu in menus() {
            for action in &menu.actions {
                let plans: Vec<&Plan> = match &action.kind {
                    ActionKind::ListDevices => continue,
                    ActionKind::Run(plan) => vec![plan],
                    ActionKind::Choose { branches, .. } => branches.iter().map(|(_, p)| p).collect(),
                };
                for plan in plans {
                    let inputs: Inputs = plan.fields.iter().map(|_| "x").collect();
                    let steps = (plan.steps)(&inputs);
                    assert!(!steps.is_empty(), "{} has no steps", action.title);
                    assert!(steps.iter().all(|s| !s.args.is_empty()));
                }
            }
        }
    }

    #[test]
    fn wifi_connect_switches_to_tcpip_first() {
        let menus = menus();
        let plan = plan(&menus, "Device Management", "Connects");

        assert_eq!(
            args(plan, &["192.168.0.12"]),
            [vec!["tcpip", "5555"], vec!["connect", "192.168.0.12"]]
        );
    }

    #[test]
    fn screenshot_captures_then_pulls() {
        let menus = menus();
        let plan = plan(&menus, "Screen Management", "Take a screenshot");

        assert_eq!(
            args(plan, &["shot.png"]),
            [
                vec!["shell", "screencap", "/sdcard/shot.png"],
                vec!["pull", "/sdcard/shot.png", "shot.png"]
            ]
        );
    }

    #[test]
    fn port_forwarding_uses_tcp_specs() {
        let menus = menus();

        assert_eq!(
            args(plan(&menus, "Network Management", "Forward a local"), &["8080", "80"]),
            [vec!["forward", "tcp:8080", "tcp:80"]]
        );
        assert_eq!(
            args(plan(&menus, "Network Management", "Forward a remote"), &["9000", "3000"]),
            [vec!["reverse", "tcp:9000", "tcp:3000"]]
        );
    }

    #[test]
    fn chmod_puts_mode_before_path() {
        let menus = menus();
        let plan = plan(&menus, "Root Access and File Permissions", "Change");

        assert_eq!(
            args(plan, &["/data/local/tmp/run.sh", "755"]),
            [vec!["shell", "chmod", "755", "/data/local/tmp/run.sh"]]
        );
    }

    #[test]
    fn swipe_message_names_both_points() {
        let menus = menus();
        let plan = plan(&menus, "Remote Control", "Simulate a swipe");
        let inputs: Inputs = ["10", "20", "30", "40", "300"].into_iter().collect();

        assert_eq!(
            plan.done.map(|done| done(&inputs)).as_deref(),
            Some("Swipe simulated from (10, 20) to (30, 40) over 300 ms.")
        );
    }

    #[test]
    fn read_style_queries_are_printed() {
        let menus = menus();

        for (menu, label) in [
            ("Shell and Command Execution", "List all installed"),
            ("Network Management", "Display network"),
            ("Battery Management", "Dump"),
            ("Advanced Usage", "Get device"),
        ] {
            let steps = (plan(&menus, menu, label).steps)(&Inputs::default());
            assert!(steps.iter().all(|s| s.sink == Sink::Print), "{label}");
        }

        let steps = (plan(&menus, "System Management", "Save logs").steps)(&Inputs::default());
        assert_eq!(steps[0].sink, Sink::LogFile);
        assert_eq!(steps[0].args, ["logcat", "-d"]);
    }

    #[test]
    fn policy_hint_only_for_missing_command() {
        assert_eq!(
            policy_manager_hint(&failed("/system/bin/sh: device_policy_manager: not found")),
            Some(POLICY_MANAGER_UNAVAILABLE)
        );
        assert_eq!(
            policy_manager_hint(&failed("cmd: service is inaccessible")),
            Some(POLICY_MANAGER_UNAVAILABLE)
        );
        assert_eq!(policy_manager_hint(&failed("error: device offline")), None);
    }
}
