mod app_submit;

/// Everything the merge form needs between frames.
pub struct App {
    client: MergeClient,
    // Form state
    settings: MergeSettings,
    extra_text: String,
    fixed_text: String,
    video_files: Vec<PathBuf>,
    audio_file: Option<PathBuf>,
    // At most one submission in flight
    submission: Option<Submission>,
    // Outcome of the last finished submission
    result: Option<MergedVideo>,
    error: Option<String>,
}

impl App {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: MergeClient::new(webhook_url),
            settings: MergeSettings::default(),
            extra_text: String::new(),
            fixed_text: String::new(),
            video_files: Vec::new(),
            audio_file: None,
            submission: None,
            result: None,
            error: None,
        }
    }

    fn is_loading(&self) -> bool {
        self.submission.is_some()
    }

    /// Drain the in-flight submission if it finished this frame.
    fn poll_submission(&mut self) {
        let Some(sub) = self.submission.as_mut() else {
            return;
        };
        let Some(outcome) = sub.try_outcome() else {
            return;
        };
        self.submission = None;
        match outcome {
            Ok(video) => {
                tracing::info!(
                    "Merge finished: {} ({} bytes)",
                    video.content_type(),
                    video.len()
                );
                // Dropping the previous result releases its temp file.
                self.result = Some(video);
            }
            // Cancellation is silent; the form simply unlocks.
            Err(MergeError::Cancelled) => {}
            Err(err) => {
                tracing::error!("Merge failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Back to an empty form. The old result drops here, deleting its file.
    fn reset(&mut self) {
        self.settings = MergeSettings::default();
        self.extra_text.clear();
        self.fixed_text.clear();
        self.video_files.clear();
        self.audio_file = None;
        self.result = None;
        self.error = None;
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("🎬 Video-Audio Merge Settings");
            ui.label("Choose how you want to control the duration of merged video and audio.");
        });
        ui.add_space(12.0);

        let loading = self.is_loading();
        ui.add_enabled_ui(!loading, |ui| {
            self.file_pickers_ui(ui);
            ui.add_space(8.0);
            self.mode_selector_ui(ui);
            self.duration_fields_ui(ui);
        });
        ui.add_space(16.0);

        if loading {
            self.processing_ui(ui);
        } else if ui
            .add_sized(
                [ui.available_width(), 32.0],
                egui::Button::new("🚀 Merge Video & Audio"),
            )
            .clicked()
        {
            self.start_merge();
        }

        self.error_banner_ui(ui);
    }

    fn file_pickers_ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Upload Videos");
        ui.horizontal(|ui| {
            if ui.button("🎥 Browse...").clicked() {
                if let Some(files) = rfd::FileDialog::new()
                    .add_filter("Video", &["mp4", "m4v", "mov", "mkv", "avi", "webm"])
                    .pick_files()
                {
                    self.video_files = files;
                }
            }
            ui.label(video_summary(&self.video_files));
            if !self.video_files.is_empty() && ui.small_button("✕").clicked() {
                self.video_files.clear();
            }
        });
        ui.add_space(4.0);

        ui.label("Upload Audio");
        ui.horizontal(|ui| {
            if ui.button("🎵 Browse...").clicked() {
                if let Some(file) = rfd::FileDialog::new()
                    .add_filter("Audio", &["mp3", "wav", "ogg", "aac", "flac", "m4a"])
                    .pick_file()
                {
                    self.audio_file = Some(file);
                }
            }
            ui.label(audio_summary(self.audio_file.as_deref()));
            if self.audio_file.is_some() && ui.small_button("✕").clicked() {
                self.audio_file = None;
            }
        });
    }

    fn mode_selector_ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Select Merge Mode");
        egui::ComboBox::from_id_salt("merge_mode")
            .width(ui.available_width())
            .selected_text(self.settings.merge_mode.label())
            .show_ui(ui, |ui| {
                for mode in MergeMode::ALL {
                    ui.selectable_value(&mut self.settings.merge_mode, mode, mode.label());
                }
            });
        ui.add_space(4.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(self.settings.merge_mode.explanation());
        });
    }

    /// The two numeric fields only exist for the modes that read them.
    /// Hiding a field keeps its last value; it just stops being shown.
    fn duration_fields_ui(&mut self, ui: &mut egui::Ui) {
        if self.settings.merge_mode.needs_extra_duration() {
            ui.add_space(8.0);
            ui.label("Extra Duration (seconds)");
            let mut text = self.extra_text.clone();
            let changed = ui
                .add(egui::TextEdit::singleline(&mut text).hint_text("e.g., 15"))
                .changed();
            if changed {
                match parse_duration_entry(&text, DurationRule::AllowZero) {
                    DurationEntry::Unset => {
                        self.settings.extra_duration = None;
                        self.extra_text = text;
                    }
                    DurationEntry::Value(secs) => {
                        self.settings.extra_duration = Some(secs);
                        self.extra_text = text;
                    }
                    // The edit never lands; the previous buffer stays.
                    DurationEntry::Rejected => {}
                }
            }
        }
        if self.settings.merge_mode.needs_fixed_duration() {
            ui.add_space(8.0);
            ui.label("Fixed Duration (seconds)");
            let mut text = self.fixed_text.clone();
            let changed = ui
                .add(egui::TextEdit::singleline(&mut text).hint_text("e.g., 60"))
                .changed();
            if changed {
                match parse_duration_entry(&text, DurationRule::Positive) {
                    DurationEntry::Unset => {
                        self.settings.fixed_duration = None;
                        self.fixed_text = text;
                    }
                    DurationEntry::Value(secs) => {
                        self.settings.fixed_duration = Some(secs);
                        self.fixed_text = text;
                    }
                    DurationEntry::Rejected => {}
                }
            }
        }
    }

    fn processing_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add(egui::Spinner::new().size(24.0));
            ui.strong("Processing...");
            ui.label("This may take a minute, please wait.");
            ui.add_space(8.0);
            if ui.button("Cancel").clicked() {
                self.cancel_merge();
            }
        });
    }

    fn error_banner_ui(&mut self, ui: &mut egui::Ui) {
        let Some(message) = &self.error else {
            return;
        };
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.colored_label(egui::Color32::LIGHT_RED, "An Error Occurred");
            });
            ui.label(message);
        });
    }

    fn result_ui(&mut self, ui: &mut egui::Ui) {
        let Some(summary) = self
            .result
            .as_ref()
            .map(|video| format!("{} ({})", video.content_type(), format_size(video.len())))
        else {
            return;
        };
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading("✅ Merge Successful!");
            ui.label("Your video is ready. You can play it below or download it.");
            ui.add_space(4.0);
            ui.weak(summary);
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("▶ Play Video").clicked() {
                    self.play_video();
                }
                if ui.button("⬇ Download Video").clicked() {
                    self.save_video();
                }
                if ui.button("🔄 Start New Merge").clicked() {
                    self.reset();
                }
            });
        });
        self.error_banner_ui(ui);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_submission();
        if self.is_loading() {
            // Keep polling for the worker's outcome even when no input arrives.
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_width(ui.available_width());
                if self.result.is_some() {
                    self.result_ui(ui);
                } else {
                    self.form_ui(ui);
                }
            });
        });
    }
}

fn video_summary(files: &[PathBuf]) -> String {
    match files {
        [] => "Choose files...".to_string(),
        [only] => file_label(only),
        many => format!("{} files selected", many.len()),
    }
}

fn audio_summary(file: Option<&Path>) -> String {
    match file {
        Some(path) => file_label(path),
        None => "Choose an audio file...".to_string(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
