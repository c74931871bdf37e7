use crate::extensions::{ChartEvent, PluginContext};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn plugin_context(&self) -> PluginContext {
        let selection = self.gesture.selection();
        PluginContext {
            detail_viewport: self.detail.viewport(),
            overview_viewport: self.overview.viewport(),
            selection: (selection.start(), selection.end()),
            visible_indices: self
                .detail
                .window()
                .map(|window| (window.first_visible_index, window.last_visible_index)),
            displayed_range: self.detail.displayed_range(),
            target_range: self.detail.target_range(),
            series_count: self.dataset.series_count(),
            visible_series_count: self.visibility.visible_indices().count(),
            axis_len: self.dataset.axis_len(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: ChartEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in self.plugins.values_mut() {
            plugin.on_event(event, context);
        }
    }
}
