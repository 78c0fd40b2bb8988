use chrono::{TimeZone, Utc};
use speculate2::speculate;
use upkeep::db::Database;
use upkeep::models::*;

fn signup(name: &str, email: &str) -> SignupInput {
    SignupInput {
        name: name.to_string(),
        password: "hunter22".to_string(),
        email: email.to_string(),
    }
}

fn address() -> NewHouseholdInput {
    NewHouseholdInput {
        street_addr: "14 Maple Street".to_string(),
        apt: None,
        city: "Portland".to_string(),
        state: "OR".to_string(),
        zip: "97201".to_string(),
    }
}

fn task_input(household_id: i64, title: &str, day: u32) -> CreateTaskInput {
    CreateTaskInput {
        household_id,
        title: title.to_string(),
        location: "Kitchen".to_string(),
        due_date: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
        notes: None,
        recurrence: Recurrence::None,
        completed: false,
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "users" {
        it "assigns sequential uids on signup" {
            let a = db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            let b = db.create_user(signup("Ben", "ben@example.com")).expect("signup failed");
            assert_eq!(a.uid, 1);
            assert_eq!(b.uid, 2);
        }

        it "verifies matching credentials" {
            db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            assert!(db.verify_login("ada@example.com", "hunter22").expect("query failed"));
        }

        it "rejects a wrong password and an unknown email" {
            db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            assert!(!db.verify_login("ada@example.com", "wrong").expect("query failed"));
            assert!(!db.verify_login("nobody@example.com", "hunter22").expect("query failed"));
        }

        it "rejects re-registering an email" {
            db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            assert!(db.create_user(signup("Imposter", "ada@example.com")).is_err());
        }

        it "finds a uid by email" {
            let user = db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            assert_eq!(db.get_uid("ada@example.com").expect("query failed"), Some(user.uid));
        }

        it "returns None for an unknown email" {
            assert_eq!(db.get_uid("nobody@example.com").expect("query failed"), None);
        }
    }

    describe "households" {
        it "round-trips the address" {
            let household = db.create_household(address()).expect("create failed");
            let found = db.get_household_address(household.household_id)
                .expect("query failed")
                .expect("household missing");
            assert_eq!(found.street_addr, "14 Maple Street");
            assert_eq!(found.apt, None);
            assert_eq!(found.zip, "97201");
        }

        it "returns None for an unknown household" {
            assert!(db.get_household_address(404).expect("query failed").is_none());
        }

        it "joins a user and finds their household" {
            let user = db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            let household = db.create_household(address()).expect("create failed");

            db.join_household(user.uid, household.household_id).expect("join failed");
            assert_eq!(
                db.household_for_user(user.uid).expect("query failed"),
                Some(household.household_id)
            );
        }

        it "returns None for a user with no household" {
            let user = db.create_user(signup("Ada", "ada@example.com")).expect("signup failed");
            assert_eq!(db.household_for_user(user.uid).expect("query failed"), None);
        }
    }

    describe "tasks" {
        it "stores and returns the encoded frequency" {
            let household = db.create_household(address()).expect("create failed");
            let mut input = task_input(household.household_id, "Descale kettle", 1);
            input.recurrence = Recurrence::every(2, RecurrenceUnit::Weeks).unwrap();

            db.create_task(input).expect("insert failed");

            let tasks = db.get_tasks_for_household(household.household_id).expect("query failed");
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].recurrence.to_string(), "Every 2 Weeks");
        }

        it "orders household tasks by due date" {
            let household = db.create_household(address()).expect("create failed");
            db.create_task(task_input(household.household_id, "Later", 20)).expect("insert failed");
            db.create_task(task_input(household.household_id, "Sooner", 5)).expect("insert failed");

            let titles: Vec<String> = db
                .get_tasks_for_household(household.household_id)
                .expect("query failed")
                .into_iter()
                .map(|t| t.title)
                .collect();
            assert_eq!(titles, ["Sooner", "Later"]);
        }

        it "scopes tasks to their household" {
            let ours = db.create_household(address()).expect("create failed");
            let theirs = db.create_household(address()).expect("create failed");
            db.create_task(task_input(ours.household_id, "Ours", 1)).expect("insert failed");
            db.create_task(task_input(theirs.household_id, "Theirs", 1)).expect("insert failed");

            let tasks = db.get_tasks_for_household(ours.household_id).expect("query failed");
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].title, "Ours");
        }

        it "keeps the due instant intact" {
            let household = db.create_household(address()).expect("create failed");
            let input = task_input(household.household_id, "Clean oven", 9);
            let due = input.due_date;

            db.create_task(input).expect("insert failed");

            let tasks = db.get_tasks_for_household(household.household_id).expect("query failed");
            assert_eq!(tasks[0].due_date, due);
        }
    }

    describe "appliances" {
        it "stores an inventory entry" {
            let appliance = db.add_appliance(AddApplianceInput {
                room: "Kitchen".to_string(),
                name: "Refrigerator".to_string(),
                make: Some("Frigidaire".to_string()),
                model: Some("FFTR1835VS".to_string()),
                maintenance_period: Some("every 6 months".to_string()),
            }).expect("insert failed");

            assert_eq!(appliance.id, 1);
            assert_eq!(appliance.room, "Kitchen");
        }
    }
}

mod file_backed {
    use super::*;

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("nested").join("upkeep.db");

        let db = Database::open(path).expect("open failed");
        db.migrate().expect("migrate failed");
        db.create_user(signup("Ada", "ada@example.com"))
            .expect("signup failed");
    }
}
