//! ssh(1)

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::compiler::{Record, RecordDescriptor};
use crate::field::{ArgValue, FieldSpec, Value};

/// Options of ssh(1), one field per option
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ssh {
    /// -1
    pub ssh_v1: bool,
    /// -2
    pub ssh_v2: bool,
    /// -4
    pub ipv4: bool,
    /// -6
    pub ipv6: bool,
    /// -A
    pub agent_forwarding: bool,
    /// -a
    pub no_agent_forwarding: bool,
    /// -b <bind_address>
    pub bind_address: String,
    /// -C
    pub compression: bool,
    /// -c <cipher_spec>
    pub cipher_spec: String,
    /// -D [<bind_address>:]<port>
    pub dynamic_forward: String,
    /// -e <escape_char>
    pub escape_char: String,
    /// -F <configfile>
    pub config_file: String,
    /// -f
    pub background: bool,
    /// -g
    pub allow_remote_connections_to_local_forwarded_ports: bool,
    /// -I <pkcs11>
    pub pkcs11: String,
    /// -i <identity>
    pub identity: String,
    /// -K
    pub gssapi: bool,
    /// -k
    pub no_gssapi: bool,
    /// -L [<bind_address>:]<port>:<host>:<hostport>
    pub local_forward: String,
    /// -l <login_name>
    pub login: String,
    /// -M
    pub master: bool,
    /// -m <mac_spec>
    pub mac_spec: String,
    /// -N
    pub no_remote_command: bool,
    /// -n
    pub no_read_stdin: bool,
    /// -O <ctl_cmd>
    pub control_command: String,
    /// -o <option>, rendered by [`SshOptions`] itself
    pub options: SshOptions,
    /// -p <port>
    pub port: u16,
    /// -q
    pub quiet: bool,
    /// -R [<bind_address>:]<port>:<host>:<hostport>
    pub remote_forward: String,
    /// -S <ctl_path>
    pub control_path: String,
    /// -s
    pub subsystem: bool,
    /// -T
    pub no_tty: bool,
    /// -t
    pub tty: bool,
    /// -v, -vv and -vvv
    pub verbose: bool,
    pub verbose1: bool,
    pub verbose2: bool,
    pub verbose3: bool,
    /// -W <host>:<port>
    pub forward_stdin_stdout: String,
    /// -w <local_tun>:<remote_tun>
    pub tunnel: String,
    /// -X
    pub x11: bool,
    /// -x
    pub no_x11: bool,
    /// -Y
    pub trusted_x11: bool,
    /// -y
    pub syslog: bool,

    /// [<username>@]<hostname>
    pub hostname: String,
    /// <command>
    pub command: Vec<String>,
}

impl Record for Ssh {
    const DESCRIPTOR: RecordDescriptor = RecordDescriptor {
        name: "SSH",
        fields: &[
            FieldSpec::new("ssh_v1").flag("-1"),
            FieldSpec::new("ssh_v2").flag("-2"),
            FieldSpec::new("ipv4").flag("-4"),
            FieldSpec::new("ipv6").flag("-6"),
            FieldSpec::new("agent_forwarding").flag("-A"),
            FieldSpec::new("no_agent_forwarding").flag("-a"),
            FieldSpec::new("bind_address").flag("-b"),
            FieldSpec::new("compression").flag("-C"),
            FieldSpec::new("cipher_spec").flag("-c"),
            FieldSpec::new("dynamic_forward").flag("-D"),
            FieldSpec::new("escape_char").flag("-e"),
            FieldSpec::new("config_file").flag("-F"),
            FieldSpec::new("background").flag("-f"),
            FieldSpec::new("allow_remote_connections_to_local_forwarded_ports").flag("-g"),
            FieldSpec::new("pkcs11").flag("-I"),
            FieldSpec::new("identity").flag("-i"),
            FieldSpec::new("gssapi").flag("-K"),
            FieldSpec::new("no_gssapi").flag("-k"),
            FieldSpec::new("local_forward").flag("-L"),
            FieldSpec::new("login").flag("-l"),
            FieldSpec::new("master").flag("-M"),
            FieldSpec::new("mac_spec").flag("-m"),
            FieldSpec::new("no_remote_command").flag("-N"),
            FieldSpec::new("no_read_stdin").flag("-n"),
            FieldSpec::new("control_command").flag("-O"),
            FieldSpec::new("options").flag("-"),
            FieldSpec::new("port").flag("-p"),
            FieldSpec::new("quiet").flag("-q"),
            FieldSpec::new("remote_forward").flag("-R"),
            FieldSpec::new("control_path").flag("-S"),
            FieldSpec::new("subsystem").flag("-s"),
            FieldSpec::new("no_tty").flag("-T"),
            FieldSpec::new("tty").flag("-t"),
            FieldSpec::new("verbose").flag("-v"),
            FieldSpec::new("verbose1").flag("-v"),
            FieldSpec::new("verbose2").flag("-vv"),
            FieldSpec::new("verbose3").flag("-vvv"),
            FieldSpec::new("forward_stdin_stdout").flag("-W"),
            FieldSpec::new("tunnel").flag("-w"),
            FieldSpec::new("x11").flag("-X"),
            FieldSpec::new("no_x11").flag("-x"),
            FieldSpec::new("trusted_x11").flag("-Y"),
            FieldSpec::new("syslog").flag("-y"),
            FieldSpec::new("hostname").last(),
            FieldSpec::new("command").last(),
        ],
    };

    fn values(&self) -> Vec<Value<'_>> {
        vec![
            self.ssh_v1.to_value(),
            self.ssh_v2.to_value(),
            self.ipv4.to_value(),
            self.ipv6.to_value(),
            self.agent_forwarding.to_value(),
            self.no_agent_forwarding.to_value(),
            self.bind_address.to_value(),
            self.compression.to_value(),
            self.cipher_spec.to_value(),
            self.dynamic_forward.to_value(),
            self.escape_char.to_value(),
            self.config_file.to_value(),
            self.background.to_value(),
            self.allow_remote_connections_to_local_forwarded_ports.to_value(),
            self.pkcs11.to_value(),
            self.identity.to_value(),
            self.gssapi.to_value(),
            self.no_gssapi.to_value(),
            self.local_forward.to_value(),
            self.login.to_value(),
            self.master.to_value(),
            self.mac_spec.to_value(),
            self.no_remote_command.to_value(),
            self.no_read_stdin.to_value(),
            self.control_command.to_value(),
            self.options.to_value(),
            self.port.to_value(),
            self.quiet.to_value(),
            self.remote_forward.to_value(),
            self.control_path.to_value(),
            self.subsystem.to_value(),
            self.no_tty.to_value(),
            self.tty.to_value(),
            self.verbose.to_value(),
            self.verbose1.to_value(),
            self.verbose2.to_value(),
            self.verbose3.to_value(),
            self.forward_stdin_stdout.to_value(),
            self.tunnel.to_value(),
            self.x11.to_value(),
            self.no_x11.to_value(),
            self.trusted_x11.to_value(),
            self.syslog.to_value(),
            self.hostname.to_value(),
            self.command.to_value(),
        ]
    }
}

/// Options as specified in ssh_config(5), kept sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SshOptions(pub BTreeMap<String, String>);

impl SshOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SshOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| format!("-o {}={}", key, value))
            .collect();
        f.write_str(&options.join(" "))
    }
}

impl ArgValue for SshOptions {
    fn to_value(&self) -> Value<'_> {
        Value::other(self.is_empty(), self)
    }
}
