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

    frontend_common::dispatch::info.rs

    Built-in informational pages.
*/

use vf_common::VfHashMap;

use super::Dispatcher;
use crate::types::command::InfoPage;

const ABOUT: &str = concat!(
    "ViceFront Version ",
    env!("CARGO_PKG_VERSION"),
    "\n\n\u{a9} 2022-2025 Daniel Balsom\n",
    "\nOfficial VICE homepage:\nhttps://vice-emu.sourceforge.io/"
);

const CONTRIBUTORS: &str = "ViceFront is a front end for the VICE emulator.\n\
    See the VICE documentation for the list of VICE contributors.";

const LICENSE: &str = "Permission is hereby granted, free of charge, to any person obtaining a copy of this \
    software and associated documentation files (the \u{201c}Software\u{201d}), to deal in the Software without \
    restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, \
    sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do \
    so, subject to the following conditions:\n\nThe above copyright notice and this permission notice shall be \
    included in all copies or substantial portions of the Software.";

const WARRANTY: &str = "THE SOFTWARE IS PROVIDED \u{201c}AS IS\u{201d}, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR \
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND \
    NONINFRINGEMENT.";

fn compile_time_features() -> String {
    let features = [
        ("debug assertions", cfg!(debug_assertions)),
        ("web target", cfg!(target_arch = "wasm32")),
        ("unix", cfg!(unix)),
        ("windows", cfg!(windows)),
    ];
    features
        .iter()
        .map(|(descr, defined)| format!("{}\t{}\n", if *defined { "yes " } else { "no  " }, descr))
        .collect()
}

pub(super) fn default_pages() -> VfHashMap<InfoPage, String> {
    let mut pages = VfHashMap::default();
    pages.insert(InfoPage::About, ABOUT.to_string());
    pages.insert(InfoPage::Contributors, CONTRIBUTORS.to_string());
    pages.insert(InfoPage::License, LICENSE.to_string());
    pages.insert(InfoPage::Warranty, WARRANTY.to_string());
    pages.insert(InfoPage::CompileTimeFeatures, compile_time_features());
    pages
}

fn page_title(page: InfoPage) -> &'static str {
    match page {
        InfoPage::About => "About",
        InfoPage::Contributors => "Contributors",
        InfoPage::License => "License",
        InfoPage::Warranty => "No warranty!",
        InfoPage::CommandLineOptions => "Command line options",
        InfoPage::CompileTimeFeatures => "Compile time features",
    }
}

impl Dispatcher {
    pub(super) fn show_info(&mut self, page: InfoPage) {
        let Some(text) = self.info_pages.get(&page)
        else {
            log::debug!("show_info(): no text for {:?}", page);
            return;
        };
        match page {
            InfoPage::About => self.ui.message(text),
            _ => self.ui.show_text(page_title(page), text),
        }
    }
}
