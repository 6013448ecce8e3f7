#![allow(dead_code)]

pub mod host;

use marque::{AccountId, Name, Registry, Serial};

pub use host::TestHost;

pub fn name(s: &str) -> Name {
    Name::parse(s).unwrap()
}

pub fn account(s: &str) -> AccountId {
    AccountId::parse(s).unwrap()
}

pub const ADMIN: &str = "admin";
pub const MANAGER: &str = "mgr";

/// Registry with one group `widgets` (manager `mgr`) and the given cap.
pub fn registry_with_group(supply_cap: u64) -> Registry<TestHost> {
    let host = TestHost::with_accounts(&[ADMIN, MANAGER, "u1", "u2", "u3"]);
    let mut reg = Registry::init("registry", "v0.1.0", account(ADMIN), host).unwrap();
    reg.new_group(
        &account(ADMIN),
        "Widgets",
        "test widgets",
        name("widgets"),
        account(MANAGER),
        supply_cap,
    )
    .unwrap();
    reg
}

/// Registry with a `widgets` group and one item minted to `u1`.
pub fn registry_with_item() -> (Registry<TestHost>, Serial) {
    let mut reg = registry_with_group(10);
    let serial = reg
        .mint(&account(MANAGER), account("u1"), &name("widgets"))
        .unwrap();
    (reg, serial)
}
