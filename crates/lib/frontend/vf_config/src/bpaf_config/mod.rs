/*
    ViceFront

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    vf_config::bpaf_config::mod.rs

    Command line arguments. Anything given here overrides the configuration file.
*/

use std::path::PathBuf;

use crate::attach::AttachSpec;
use vf_common::MachineClass;

#[cfg(feature = "use_bpaf")]
use bpaf::{Bpaf, Parser};

#[cfg(feature = "use_bpaf")]
fn attach_arg() -> impl Parser<Vec<AttachSpec>> {
    bpaf::short('a')
        .long("attach")
        .help("Attach media with syntax: 8:disk.d64, tape:game.tap or auto:demo.prg")
        .argument::<String>("attachspec")
        .parse(|s| s.parse::<AttachSpec>())
        .many()
}

#[cfg_attr(feature = "use_bpaf", derive(Bpaf))]
#[cfg_attr(feature = "use_bpaf", bpaf(options, version, generate(cli_args)))]
#[derive(Debug, Default)]
pub struct CmdLineArgs {
    #[cfg_attr(feature = "use_bpaf", bpaf(long("config_file"), long("configfile")))]
    pub config_file: Option<PathBuf>,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("base_dir"), long("basedir")))]
    pub base_dir: Option<PathBuf>,

    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub log_level: Option<String>,

    // Machine options
    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub machine_name: Option<String>,

    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub machine_class: Option<MachineClass>,

    #[cfg_attr(feature = "use_bpaf", bpaf(external(attach_arg)))]
    pub attach: Vec<AttachSpec>,

    // UI options
    #[cfg_attr(feature = "use_bpaf", bpaf(long("joy_display"), long("joydisplay"), switch))]
    pub joydisplay: bool,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("no_confirm_exit"), long("noconfirmexit"), switch))]
    pub no_confirm_exit: bool,

    #[cfg_attr(feature = "use_bpaf", bpaf(long("save_res"), long("saveres"), switch))]
    pub saveres: bool,

    // Headless options
    #[cfg_attr(feature = "use_bpaf", bpaf(long))]
    pub ticks: Option<u32>,
}
