//! Demo workspace used on first launch of an empty store.

use chrono::NaiveDate;

use crate::models::{
    Budget, Platform, PostDraft, PostStatus, ProjectDraft, ProjectStatus, Role, TaskDraft,
    TaskStatus, Timeline, UserDraft,
};
use crate::settings::Config;
use crate::store::Store;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Populates a demo agency: one admin, two editors, one client, two
/// projects with tasks and scheduled content.
pub fn populate(store: &mut Store, config: &Config) {
    let admin = UserDraft::new(config.admin_email.clone(), Role::Admin);
    store.create_user(admin);

    let mut editor_one = UserDraft::new("alex@atelier.local", Role::Editor);
    editor_one.name = Some("Alex Editor".to_string());
    let editor_one = store.create_user(editor_one);

    let mut editor_two = UserDraft::new("sam@atelier.local", Role::Editor);
    editor_two.name = Some("Sam Creative".to_string());
    let editor_two = store.create_user(editor_two);

    let mut client = UserDraft::new("jane@brand.example", Role::Client);
    client.name = Some("Jane Client".to_string());
    let client = store.create_user(client);

    let campaign = store.create_project(ProjectDraft {
        name: Some("Summer Campaign".to_string()),
        client_id: Some(client.id.clone()),
        client_name: Some("Brand Co.".to_string()),
        member_ids: Some(vec![editor_one.id.clone(), editor_two.id.clone()]),
        status: Some(ProjectStatus::Active),
        timeline: Some(Timeline {
            start: date(2024, 6, 1),
            end: date(2024, 8, 30),
        }),
        budget: Some(Budget {
            total: 15_000,
            received: 5_000,
            breakdown: Vec::new(),
        }),
    });

    store.create_project(ProjectDraft {
        name: Some("Social Media Strategy".to_string()),
        client_id: Some(client.id.clone()),
        client_name: Some("Brand Co.".to_string()),
        member_ids: Some(vec![editor_one.id.clone()]),
        status: Some(ProjectStatus::Planning),
        timeline: Some(Timeline {
            start: date(2024, 7, 15),
            end: date(2024, 12, 15),
        }),
        budget: Some(Budget {
            total: 8_000,
            received: 2_000,
            breakdown: Vec::new(),
        }),
    });

    let mut brainstorm = TaskDraft::new(campaign.id.clone());
    brainstorm.title = Some("Brainstorm Reels".to_string());
    brainstorm.description = Some("Ideate thirty high-engagement reels".to_string());
    brainstorm.assigned_editor_id = Some(editor_one.id.clone());
    brainstorm.due_date = Some(date(2024, 6, 15));
    brainstorm.status = Some(TaskStatus::Completed);
    brainstorm.value = Some(500);
    store.create_task(brainstorm);

    let mut filming = TaskDraft::new(campaign.id.clone());
    filming.title = Some("Filming Session 1".to_string());
    filming.description = Some("On-site filming with talent".to_string());
    filming.assigned_editor_id = Some(editor_one.id.clone());
    filming.due_date = Some(date(2024, 6, 20));
    filming.status = Some(TaskStatus::InProgress);
    filming.value = Some(1_200);
    store.create_task(filming);

    let mut reel = PostDraft::new(campaign.id.clone());
    reel.title = Some("Match Stories Reel".to_string());
    reel.date = Some(date(2024, 6, 10));
    reel.platform = Some(Platform::Instagram);
    reel.status = Some(PostStatus::Published);
    reel.editor_id = Some(editor_one.id.clone());
    store.create_post(reel);

    let mut vibe = PostDraft::new(campaign.id);
    vibe.title = Some("Summer Vibe Check".to_string());
    vibe.date = Some(date(2024, 6, 12));
    vibe.platform = Some(Platform::TikTok);
    vibe.status = Some(PostStatus::Scheduled);
    vibe.editor_id = Some(editor_one.id);
    store.create_post(vibe);
}
