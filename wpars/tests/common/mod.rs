//! Scripted in-memory stand-ins for wpa_supplicant and the user.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::Mutex;
use zvariant::OwnedObjectPath;

use wpars::{
    Interface, InterfaceEvent, PropValue, PropertyMap, Prompter, Ssid, SupplicantBus, WpaError,
};

pub const IFACE_PATH: &str = "/fi/w1/wpa_supplicant1/Interfaces/0";

pub fn path(s: &str) -> OwnedObjectPath {
    OwnedObjectPath::try_from(s).unwrap()
}

pub fn bss_path(n: u32) -> OwnedObjectPath {
    path(&format!("{IFACE_PATH}/BSSs/{n}"))
}

pub fn network_path(n: u32) -> OwnedObjectPath {
    path(&format!("{IFACE_PATH}/Networks/{n}"))
}

pub fn iface() -> Interface {
    Interface {
        name: "wlan0".into(),
        path: path(IFACE_PATH),
    }
}

/// The shape `GetAll` returns for a network object.
pub fn network_properties(ssid: &str, enabled: Option<bool>) -> PropertyMap {
    let mut table = PropertyMap::new();
    table.insert("ssid".into(), PropValue::from(ssid));
    table.insert("key_mgmt".into(), PropValue::from("WPA-PSK"));

    let mut all = PropertyMap::new();
    all.insert("Properties".into(), PropValue::Map(table));
    if let Some(enabled) = enabled {
        all.insert("Enabled".into(), PropValue::Bool(enabled));
    }
    all
}

fn remote_error(operation: &str) -> WpaError {
    WpaError::Dbus(zbus::Error::Failure(format!("{operation} rejected")))
}

/// A recorded bus operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetInterface(String),
    CreateInterface(PropertyMap),
    Scan(PropertyMap),
    AddNetwork(PropertyMap),
    Disconnect,
    SelectNetwork(OwnedObjectPath),
    Reassociate,
    BssPaths,
    NetworkPaths,
    BssSsid(OwnedObjectPath),
    NetworkAllProperties(OwnedObjectPath),
    NetworkEnabled(OwnedObjectPath),
    Subscribe,
}

#[derive(Default)]
pub struct State {
    /// Interfaces `GetInterface` knows about.
    pub interfaces: HashMap<String, OwnedObjectPath>,
    /// BSS table; a `None` SSID makes the read fail as if the BSS vanished.
    pub bsss: Vec<(OwnedObjectPath, Option<Vec<u8>>)>,
    /// Network objects and what `GetAll` returns for them.
    pub networks: Vec<(OwnedObjectPath, PropertyMap)>,
    /// Typed `Enabled` values.
    pub enabled: HashMap<OwnedObjectPath, bool>,
    /// Operations that fail, by D-Bus member name.
    pub failing: HashSet<&'static str>,
    /// Events delivered after subscribing.
    pub events: Vec<InterfaceEvent>,
    /// Keep the event stream open after the scripted events.
    pub hang_after_events: bool,
    pub calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeBus {
    pub state: Mutex<State>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interface(self, ifname: &str) -> Self {
        self.edit(|s| {
            s.interfaces.insert(ifname.into(), path(IFACE_PATH));
        })
    }

    pub fn with_bss(self, n: u32, ssid: &[u8]) -> Self {
        self.edit(|s| s.bsss.push((bss_path(n), Some(ssid.to_vec()))))
    }

    pub fn with_vanished_bss(self, n: u32) -> Self {
        self.edit(|s| s.bsss.push((bss_path(n), None)))
    }

    pub fn with_network(self, n: u32, properties: PropertyMap) -> Self {
        self.edit(|s| s.networks.push((network_path(n), properties)))
    }

    pub fn with_enabled(self, n: u32, enabled: bool) -> Self {
        self.edit(|s| {
            s.enabled.insert(network_path(n), enabled);
        })
    }

    pub fn failing(self, operation: &'static str) -> Self {
        self.edit(|s| {
            s.failing.insert(operation);
        })
    }

    pub fn with_events(self, events: Vec<InterfaceEvent>) -> Self {
        self.edit(|s| s.events = events)
    }

    pub fn hanging(self) -> Self {
        self.edit(|s| s.hang_after_events = true)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that issue a method, leaving out property reads.
    pub fn method_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::GetInterface(_)
                        | Call::CreateInterface(_)
                        | Call::Scan(_)
                        | Call::AddNetwork(_)
                        | Call::Disconnect
                        | Call::SelectNetwork(_)
                        | Call::Reassociate
                )
            })
            .collect()
    }

    fn edit(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    fn record(&self, call: Call, operation: &'static str) -> wpars::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(operation) {
            Err(remote_error(operation))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SupplicantBus for FakeBus {
    async fn get_interface(&self, ifname: &str) -> wpars::Result<OwnedObjectPath> {
        self.record(Call::GetInterface(ifname.into()), "GetInterface")?;
        self.state
            .lock()
            .unwrap()
            .interfaces
            .get(ifname)
            .cloned()
            .ok_or_else(|| remote_error("GetInterface"))
    }

    async fn create_interface(&self, args: &PropertyMap) -> wpars::Result<OwnedObjectPath> {
        self.record(Call::CreateInterface(args.clone()), "CreateInterface")?;
        Ok(path(IFACE_PATH))
    }

    async fn scan(&self, _iface: &OwnedObjectPath, args: &PropertyMap) -> wpars::Result<()> {
        self.record(Call::Scan(args.clone()), "Scan")
    }

    async fn add_network(
        &self,
        _iface: &OwnedObjectPath,
        args: &PropertyMap,
    ) -> wpars::Result<OwnedObjectPath> {
        self.record(Call::AddNetwork(args.clone()), "AddNetwork")?;
        let mut state = self.state.lock().unwrap();
        let created = network_path(100 + state.networks.len() as u32);
        // stored the way the daemon writes it back
        let configured = match &args["ssid"] {
            PropValue::Str(text) => format!("\"{text}\""),
            PropValue::Bytes(raw) => Ssid::from(raw.as_slice()).to_hex(),
            other => panic!("unexpected ssid value {other:?}"),
        };
        state
            .networks
            .push((created.clone(), network_properties(&configured, Some(true))));
        Ok(created)
    }

    async fn disconnect(&self, _iface: &OwnedObjectPath) -> wpars::Result<()> {
        self.record(Call::Disconnect, "Disconnect")
    }

    async fn select_network(
        &self,
        _iface: &OwnedObjectPath,
        network: &OwnedObjectPath,
    ) -> wpars::Result<()> {
        self.record(Call::SelectNetwork(network.clone()), "SelectNetwork")
    }

    async fn reassociate(&self, _iface: &OwnedObjectPath) -> wpars::Result<()> {
        self.record(Call::Reassociate, "Reassociate")
    }

    async fn bss_paths(&self, _iface: &OwnedObjectPath) -> wpars::Result<Vec<OwnedObjectPath>> {
        self.record(Call::BssPaths, "BSSs")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .bsss
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn network_paths(
        &self,
        _iface: &OwnedObjectPath,
    ) -> wpars::Result<Vec<OwnedObjectPath>> {
        self.record(Call::NetworkPaths, "Networks")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .networks
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn bss_ssid(&self, bss: &OwnedObjectPath) -> wpars::Result<Vec<u8>> {
        self.record(Call::BssSsid(bss.clone()), "SSID")?;
        self.state
            .lock()
            .unwrap()
            .bsss
            .iter()
            .find(|(p, _)| p == bss)
            .and_then(|(_, ssid)| ssid.clone())
            .ok_or_else(|| remote_error("SSID"))
    }

    async fn network_all_properties(
        &self,
        network: &OwnedObjectPath,
    ) -> wpars::Result<PropertyMap> {
        self.record(Call::NetworkAllProperties(network.clone()), "GetAll")?;
        self.state
            .lock()
            .unwrap()
            .networks
            .iter()
            .find(|(p, _)| p == network)
            .map(|(_, props)| props.clone())
            .ok_or_else(|| remote_error("GetAll"))
    }

    async fn network_enabled(&self, network: &OwnedObjectPath) -> wpars::Result<bool> {
        self.record(Call::NetworkEnabled(network.clone()), "Enabled")?;
        self.state
            .lock()
            .unwrap()
            .enabled
            .get(network)
            .copied()
            .ok_or_else(|| remote_error("Enabled"))
    }

    async fn interface_events(
        &self,
        _iface: &OwnedObjectPath,
    ) -> wpars::Result<BoxStream<'static, InterfaceEvent>> {
        self.record(Call::Subscribe, "subscribe")?;
        let state = self.state.lock().unwrap();
        let events = stream::iter(state.events.clone());
        if state.hang_after_events {
            Ok(events.chain(stream::pending()).boxed())
        } else {
            Ok(events.boxed())
        }
    }
}

/// A user that answers from a script.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub choices: VecDeque<String>,
    pub passphrases: VecDeque<String>,
    /// Every list of networks shown.
    pub shown: Vec<Vec<String>>,
    /// SSIDs a passphrase was asked for.
    pub asked: Vec<String>,
    pub rejected: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(choices: &[&str], passphrases: &[&str]) -> Self {
        Self {
            choices: choices.iter().map(|s| s.to_string()).collect(),
            passphrases: passphrases.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&mut self, networks: &[String]) -> io::Result<Option<String>> {
        self.shown.push(networks.to_vec());
        Ok(self.choices.pop_front())
    }

    fn passphrase(&mut self, ssid: &str) -> io::Result<String> {
        self.asked.push(ssid.to_string());
        self.passphrases
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no passphrase"))
    }

    fn invalid_choice(&mut self, input: &str, _count: usize) {
        self.rejected.push(input.to_string());
    }
}
